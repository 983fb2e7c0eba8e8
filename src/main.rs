use vtix::cli;
use vtix::ui::output;

fn main() {
    if let Err(err) = cli::run() {
        output::error(err);
        std::process::exit(1);
    }
}
