//! codegame-go - CodeGame language module for Go

mod commands;
mod gomod;
mod module;
mod session;
mod templates;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codegame_core::game::{parse_cge, CgeDefinitions, GameServer};
use codegame_core::project::{find_project_root, CODEGAME_FILE};
use codegame_core::tui::{check_toolchain, confirm, input_or_prompt, Console};
use codegame_core::{
    CliConfig, CodeGameFile, Feedback, FsRenderer, GitHubTags, ModuleConfig, ProjectType,
    StaticTags, SystemRunner, TagProvider, VersionResolver, VersionSpecifier,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use commands::build::BuildOptions;
use commands::new_client::NewClientOptions;
use commands::new_server::NewServerOptions;
use commands::run::ClientRunOptions;
use module::GoModule;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "codegame-go")]
#[command(about = "Create, update, run and build CodeGame projects written in Go")]
#[command(version)]
pub struct Args {
    /// Print every external command before running it
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project in the current directory
    #[command(subcommand)]
    New(NewCommand),
    /// Update the library and generated code of the current project
    Update(UpdateArgs),
    /// Run the current project
    Run(RunArgs),
    /// Build the current project
    Build(BuildArgs),
    /// Print module information as JSON
    Info,
}

#[derive(Subcommand, Debug)]
pub enum NewCommand {
    /// Create a game client
    Client(NewClientArgs),
    /// Create a game server
    Server(NewServerArgs),
}

#[derive(clap::Args, Debug)]
pub struct LibraryArgs {
    /// Library version to use (`latest` or `<major>.<minor>`)
    #[arg(long = "library-version")]
    pub library_version: Option<String>,

    /// Pick the highest patch release of the requested version
    #[arg(long = "prefer-highest-patch")]
    pub prefer_highest_patch: bool,

    /// Don't let `0.1` match tags such as `v0.10.0`
    #[arg(long = "strict-version-prefix")]
    pub strict_version_prefix: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewClientArgs {
    /// Name of the game
    #[arg(long = "game-name")]
    pub game_name: Option<String>,

    /// URL of the game server
    #[arg(long)]
    pub url: Option<String>,

    /// Go module path of the new project
    #[arg(long = "module-path")]
    pub module_path: Option<String>,

    #[command(flatten)]
    pub library: LibraryArgs,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewServerArgs {
    /// Go module path of the new project
    #[arg(long = "module-path")]
    pub module_path: Option<String>,

    #[command(flatten)]
    pub library: LibraryArgs,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub library: LibraryArgs,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Connect clients to this game URL instead of the project's
    #[arg(long = "override-url")]
    pub override_url: Option<String>,

    /// Port for servers (defaults to `dev_port` from the config)
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long = "game-id")]
    pub game_id: Option<String>,

    #[arg(long = "player-id")]
    pub player_id: Option<String>,

    #[arg(long = "player-secret")]
    pub player_secret: Option<String>,

    /// Join as a spectator
    #[arg(long)]
    pub spectate: bool,

    /// Arguments passed to the program
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Output file name
    #[arg(short, long)]
    pub output: Option<String>,

    /// Target OS (`current`, `windows`, `macos`, `linux`, ...)
    #[arg(long, default_value = "current")]
    pub os: String,

    /// Target architecture (`current`, `x86`, `x64`, `arm32`, `arm64`, ...)
    #[arg(long, default_value = "current")]
    pub arch: String,
}

/// Set while `run` has a program in the foreground; Ctrl+C is then left to it
static CHILD_IN_FOREGROUND: AtomicBool = AtomicBool::new(false);

/// Long-lived collaborators of one invocation
struct App {
    module: GoModule,
    config: CliConfig,
    runner: SystemRunner,
    console: Console,
}

impl App {
    fn new(verbose: bool) -> Result<Self> {
        Ok(Self {
            module: GoModule,
            config: CliConfig::load()?,
            runner: SystemRunner::new().verbose(verbose),
            console: Console::new(),
        })
    }

    /// Version requested on the command line, else the configured one
    fn specifier(&self, library: &LibraryArgs) -> Result<VersionSpecifier> {
        match &library.library_version {
            Some(version) => Ok(version.parse()?),
            None => self.config.library_version(),
        }
    }

    fn resolver(&self, library: &LibraryArgs) -> Result<VersionResolver<GitHubTags>> {
        Ok(
            VersionResolver::new(GitHubTags::from_env(self.module.user_agent())?)
                .with_policy(self.config.selection_policy(library.prefer_highest_patch))
                .with_prefix_match(self.config.prefix_match(library.strict_version_prefix)),
        )
    }

    fn session<'a, P: TagProvider>(
        &'a self,
        resolver: &'a VersionResolver<P>,
        renderer: &'a FsRenderer,
    ) -> Session<'a, P> {
        Session {
            module: &self.module,
            resolver,
            runner: &self.runner,
            renderer,
            feedback: &self.console,
            project_dir: renderer.root().to_path_buf(),
        }
    }

    /// Fetch and parse the CGE file of the game at `url`
    async fn game_definitions(&self, url: &str) -> Result<CgeDefinitions> {
        self.console.begin("Fetching game definitions...");
        let definitions: Result<CgeDefinitions> = async {
            let server = GameServer::connect(url, self.module.user_agent()).await?;
            parse_cge(&server.cge_file().await?)
        }
        .await;

        match &definitions {
            Ok(definitions) => self.console.finish(&format!(
                "Found {} events and {} commands",
                definitions.events.len(),
                definitions.commands.len()
            )),
            Err(_) => self.console.fail("Failed to fetch game definitions"),
        }
        definitions
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        if CHILD_IN_FOREGROUND.load(Ordering::SeqCst) {
            return;
        }
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = dispatch(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

async fn dispatch(args: Args) -> Result<()> {
    if let Command::Info = args.command {
        return commands::info::write_info(&GoModule, &mut std::io::stdout().lock());
    }

    let app = App::new(args.verbose)?;
    match args.command {
        Command::New(NewCommand::Client(new_args)) => new_client(&app, new_args).await,
        Command::New(NewCommand::Server(new_args)) => new_server(&app, new_args).await,
        Command::Update(update_args) => update(&app, update_args).await,
        Command::Run(run_args) => run(&app, run_args),
        Command::Build(build_args) => build(&app, build_args),
        Command::Info => Ok(()),
    }
}

fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

fn ensure_no_project(dir: &Path) -> Result<()> {
    if dir.join(CODEGAME_FILE).exists() {
        anyhow::bail!(
            "'{}' already contains a CodeGame project ({})",
            dir.display(),
            CODEGAME_FILE
        );
    }
    Ok(())
}

fn default_module_path(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().replace(' ', "-"))
        .unwrap_or_default()
}

fn not_empty(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(())
    }
}

/// Locate and load the project the current directory belongs to
fn load_project(app: &App) -> Result<(PathBuf, CodeGameFile)> {
    let root = find_project_root(&current_dir()?)?;
    let descriptor = CodeGameFile::load(&root)?;
    if descriptor.lang != app.module.name() {
        anyhow::bail!(
            "This is a '{}' project, not a '{}' project",
            descriptor.lang,
            app.module.name()
        );
    }
    Ok((root, descriptor))
}

async fn new_client(app: &App, args: NewClientArgs) -> Result<()> {
    cliclack::intro(format!("{} - new client", app.module.display_name()))?;

    let dir = current_dir()?;
    ensure_no_project(&dir)?;
    check_toolchain(&app.module.tool(), args.yes)?;
    let library_version = app.specifier(&args.library)?;

    let url = input_or_prompt(args.url, "Game URL", "", not_empty)?;
    let definitions = app.game_definitions(&url).await?;
    let game_name = input_or_prompt(
        args.game_name,
        "Game name",
        definitions.name.as_deref().unwrap_or_default(),
        not_empty,
    )?;
    let module_path = input_or_prompt(
        args.module_path,
        "Project module path",
        &default_module_path(&dir),
        gomod::validate_module_path,
    )?;

    let resolver = app.resolver(&args.library)?;
    let renderer = FsRenderer::new(templates::go_templates()?, dir);
    commands::new_client::run(
        &app.session(&resolver, &renderer),
        &NewClientOptions {
            game_name,
            url,
            module_path,
            library_version,
            definitions,
        },
    )
    .await?;

    cliclack::outro("Run `codegame run` to start your client.")?;
    Ok(())
}

async fn new_server(app: &App, args: NewServerArgs) -> Result<()> {
    cliclack::intro(format!("{} - new server", app.module.display_name()))?;

    let dir = current_dir()?;
    ensure_no_project(&dir)?;
    check_toolchain(&app.module.tool(), args.yes)?;
    let library_version = app.specifier(&args.library)?;

    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Cannot derive a project name from '{}'", dir.display()))?;
    let module_path = input_or_prompt(
        args.module_path,
        "Project module path",
        &default_module_path(&dir),
        gomod::validate_module_path,
    )?;

    let resolver = app.resolver(&args.library)?;
    let renderer = FsRenderer::new(templates::go_templates()?, dir);
    commands::new_server::run(
        &app.session(&resolver, &renderer),
        &NewServerOptions {
            name,
            module_path,
            library_version,
        },
    )
    .await?;

    cliclack::outro("Run `codegame run` to start your server.")?;
    Ok(())
}

async fn update(app: &App, args: UpdateArgs) -> Result<()> {
    let (root, descriptor) = load_project(app)?;
    let project_type = descriptor.kind()?;
    cliclack::intro(format!(
        "{} - update {}",
        app.module.display_name(),
        project_type
    ))?;
    check_toolchain(&app.module.tool(), args.yes)?;
    let library_version = app.specifier(&args.library)?;

    let warning = match project_type {
        ProjectType::Client => commands::update::client_warning(&descriptor),
        ProjectType::Server => commands::update::SERVER_WARNING.to_string(),
    };
    app.console.warn(&warning);
    if !confirm("Do you want to continue?", false, args.yes)? {
        anyhow::bail!("Update cancelled.");
    }

    let resolver = app.resolver(&args.library)?;
    let renderer = FsRenderer::new(templates::go_templates()?, root);
    let session = app.session(&resolver, &renderer);
    match project_type {
        ProjectType::Client => {
            let url = descriptor
                .url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Missing game URL in {}", CODEGAME_FILE))?;
            let definitions = app.game_definitions(url).await?;
            commands::update::update_client(&session, &descriptor, &definitions, &library_version)
                .await?;
        }
        ProjectType::Server => {
            commands::update::update_server(&session, &library_version).await?;
        }
    }

    cliclack::outro("Update complete.")?;
    Ok(())
}

/// Resolver for commands that never look up library versions
fn local_resolver() -> VersionResolver<StaticTags> {
    VersionResolver::new(StaticTags::default())
}

fn run(app: &App, args: RunArgs) -> Result<()> {
    let (root, descriptor) = load_project(app)?;
    app.module.tool().require()?;

    let resolver = local_resolver();
    let renderer = FsRenderer::new(templates::go_templates()?, root);
    let session = app.session(&resolver, &renderer);

    let spec = match descriptor.kind()? {
        ProjectType::Client => commands::run::client_command(
            &session,
            &descriptor,
            &ClientRunOptions {
                override_url: args.override_url,
                game_id: args.game_id,
                player_id: args.player_id,
                player_secret: args.player_secret,
                spectate: args.spectate,
                args: args.args,
            },
        )?,
        ProjectType::Server => commands::run::server_command(
            &session,
            args.port.unwrap_or(app.config.dev_port),
            &args.args,
        ),
    };
    CHILD_IN_FOREGROUND.store(true, Ordering::SeqCst);
    let result = commands::run::run(&session, &spec);
    CHILD_IN_FOREGROUND.store(false, Ordering::SeqCst);
    result
}

fn build(app: &App, args: BuildArgs) -> Result<()> {
    let (root, descriptor) = load_project(app)?;
    cliclack::intro(format!("{} - build", app.module.display_name()))?;
    check_toolchain(&app.module.tool(), false)?;

    let resolver = local_resolver();
    let renderer = FsRenderer::new(templates::go_templates()?, root);
    commands::build::run(
        &app.session(&resolver, &renderer),
        &descriptor,
        &BuildOptions {
            output: args.output,
            os: args.os,
            arch: args.arch,
        },
    )?;

    cliclack::outro("Build complete.")?;
    Ok(())
}
