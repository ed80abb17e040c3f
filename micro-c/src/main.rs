use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};

use micro_c::backends::Backend;
use micro_c::{analysis, assembler, parser, BackendType, CompileError};

#[derive(Parser)]
#[command(name = "micro-c")]
#[command(about = "Tiny C-like compiler emitting x86-64 assembly", version)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file to assembly
    Compile {
        /// Source file
        input: PathBuf,

        /// Target architecture
        #[arg(short, long, default_value = "fasm-x86_64")]
        target: String,

        /// Assembly output file (defaults to the input with an .asm extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the token list
        #[arg(long)]
        show_tokens: bool,

        /// Print the AST
        #[arg(long)]
        show_ast: bool,

        /// Run the assembler on the output
        #[arg(long)]
        assemble: bool,

        /// Run the produced executable and report its exit code (implies --assemble)
        #[arg(long)]
        run: bool,

        /// Assembler executable
        #[arg(long, default_value = "fasm")]
        assembler: String,
    },

    /// Parse and print tokens and AST without compiling
    Parse {
        /// Source file
        input: PathBuf,
    },

    /// List supported targets
    Targets,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Errors are rendered against the source before they leave, so the caller only prints.
fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Compile {
            input,
            target,
            output,
            show_tokens,
            show_ast,
            assemble,
            run: run_binary,
            assembler,
        } => {
            let backend_type = BackendType::from_name(&target)
                .ok_or_else(|| format!("Unknown target: {}", target))?;
            info!("Compiling {} for {}...", input.display(), target);

            let source = read_source(&input)?;
            let asm = compile(&source, backend_type, show_tokens, show_ast)
                .map_err(|e| e.report(&input.display().to_string(), &source))?;

            let output_path = output.unwrap_or_else(|| input.with_extension(backend_type.extension()));
            fs::write(&output_path, &asm).map_err(|e| CompileError::from(e).to_string())?;
            info!("Compiled to: {}", output_path.display());

            if assemble || run_binary {
                let binary = assembler::assemble(&output_path, &assembler).map_err(|e| e.to_string())?;
                info!("Assembled to: {}", binary.display());

                if run_binary {
                    let code = assembler::run(&binary).map_err(|e| e.to_string())?;
                    println!("{} exited with code {}", binary.display(), code);
                }
            }
        }
        Commands::Parse { input } => {
            info!("Parsing {}...", input.display());

            let source = read_source(&input)?;
            let path = input.display().to_string();

            println!("=== SOURCE ===");
            println!("{}", source);
            println!("=== TOKENS ===");

            let tokens = parser::tokenizer::tokenize(&source).map_err(|e| e.report(&path, &source))?;
            for token in &tokens {
                println!("{}", token);
            }

            println!("=== AST ===");
            let unit = parser::parser::parse_tokens(tokens, &source).map_err(|e| e.report(&path, &source))?;
            print!("{}", unit);
        }
        Commands::Targets => {
            println!("Supported targets:");
            for backend in BackendType::all() {
                println!("  {:12} - {}", backend.name(), backend.description());
            }
        }
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), CompileError::from(e)))
}

fn compile(
    source: &str,
    backend_type: BackendType,
    show_tokens: bool,
    show_ast: bool,
) -> Result<String, CompileError> {
    let tokens = parser::tokenizer::tokenize(source)?;
    if show_tokens {
        println!("=== TOKENS ===");
        for token in &tokens {
            println!("{}", token);
        }
    }

    let unit = parser::parser::parse_tokens(tokens, source)?;
    if show_ast {
        println!("=== AST ===");
        print!("{}", unit);
    }

    analysis::check(&unit)?;

    let mut backend = backend_type.create();
    backend.compile(&unit)
}
