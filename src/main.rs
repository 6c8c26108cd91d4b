use clap::Parser;
use miette::Result;
use dynaform::cli::{logging, workspace, Cli, Commands};
use dynaform::core::Config;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    // Commands that need the configuration report a bad one themselves
    let project = workspace::discover_project(&global).ok();
    let config = Config::load(project.as_ref()).unwrap_or_default();
    logging::init(&global, &config);

    match cli.command {
        Commands::Init(args) => dynaform::cli::commands::init::run(args),
        Commands::Template(cmd) => dynaform::cli::commands::template::run(cmd, &global),
        Commands::Submit(args) => dynaform::cli::commands::submit::run(args, &global),
        Commands::Submission(cmd) => dynaform::cli::commands::submission::run(cmd, &global),
        Commands::Completions(args) => dynaform::cli::commands::completions::run(args),
    }
}
