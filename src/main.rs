use clap::Parser;
use std::path::Path;
use tagcloud::application::context::parse_binding;
use tagcloud::application::environment::describe;
use tagcloud::application::{
    Context, Environment, Library, SimilarObjectsService, TagCloudService, TagListService,
    TagSource, Template, Value,
};
use tagcloud::cli::{format_cloud, format_similar, format_tag_counts, Cli, Commands};
use tagcloud::domain::{ContentType, ObjectRef, Scope};
use tagcloud::error::{Result, TagCloudError};
use tagcloud::infrastructure::{MemoryStore, Settings};

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::discover(cli.settings.as_deref(), &cwd)?;
    let store = MemoryStore::discover(cli.data.as_deref(), &cwd)?;
    let env = Environment::new(settings, Box::new(store))?;

    match cli.command {
        Commands::Render {
            template,
            bindings,
            bind_all,
            values,
        } => {
            let context = build_context(&env, &bindings, &bind_all, &values)?;
            print!("{}", render(&env, &template, context)?);
            Ok(())
        }
        Commands::Tags { scope, limit } => {
            let source = source_from(scope.as_deref())?;
            let tags = TagListService::new(&env).execute(&source, limit)?;
            print!("{}", ensure_newline(format_tag_counts(&tags)));
            Ok(())
        }
        Commands::Cloud { scope, limit } => {
            let source = source_from(scope.as_deref())?;
            let cloud = TagCloudService::new(&env).execute(&source, limit)?;
            print!("{}", ensure_newline(format_cloud(&cloud)));
            Ok(())
        }
        Commands::Similar {
            object,
            model,
            limit,
        } => {
            let reference: ObjectRef = object.parse()?;
            let source = env.store().registry().resolve(&reference)?;
            let model: Option<ContentType> = model.as_deref().map(str::parse::<ContentType>).transpose()?;
            let similar = SimilarObjectsService::new(&env).execute(&source, model.as_ref(), limit)?;
            print!("{}", ensure_newline(format_similar(&similar)));
            Ok(())
        }
        Commands::Check => {
            let settings = env.settings();
            println!("through model: {}", settings.tagged_item_model);
            println!("tagging: {}", describe(env.kind()));
            println!("tag relation: {}", env.count_relation());
            Ok(())
        }
    }
}

fn source_from(scope: Option<&str>) -> Result<TagSource> {
    match scope {
        Some(raw) => Ok(TagSource::Scope(Scope::parse(raw)?)),
        None => Ok(TagSource::All),
    }
}

fn build_context(
    env: &Environment,
    bindings: &[String],
    bind_all: &[String],
    values: &[String],
) -> Result<Context> {
    let registry = env.store().registry();
    let mut context = Context::new();

    for raw in values {
        let (name, value) = parse_binding(raw)?;
        context.insert(name, Value::Str(value.to_string()));
    }
    for raw in bindings {
        let (name, value) = parse_binding(raw)?;
        let reference: ObjectRef = value.parse()?;
        context.insert(name, Value::Object(registry.resolve(&reference)?));
    }
    for raw in bind_all {
        let (name, value) = parse_binding(raw)?;
        let content_type: ContentType = value.parse()?;
        context.insert(name, Value::Objects(registry.objects(&content_type)?));
    }

    Ok(context)
}

fn render(env: &Environment, path: &Path, mut context: Context) -> Result<String> {
    if !path.is_file() {
        return Err(TagCloudError::Template(format!(
            "Template not found: {}",
            path.display()
        )));
    }
    let template = Template::from_file(path, &Library::default())?;
    template.render(env, &mut context)
}

fn ensure_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
