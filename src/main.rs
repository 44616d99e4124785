mod run;

use anyhow::Result;

fn main() -> Result<()> {
    expense_report::init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let config = expense_report::Config::load()?;

    match args.len() {
        2.. => run::as_cli(&args, &config),
        _ => {
            run::print_usage();
            Ok(())
        }
    }
}
