use clap::Parser;

mod cmd;
mod input;
mod payroll;
mod report;
mod session;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let command = cmd::PayrollCommand::parse();
    log::debug!("{:?}", command);
    command.exec()
}
