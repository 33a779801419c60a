use rekod::commands::Cli;

fn main() -> anyhow::Result<()> {
    Cli::menu()
}
