use std::{error::Error, io::Write, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::Engine;

#[derive(Parser, Debug)]
#[command(name = "foneflow_admin")]
#[command(about = "Admin utilities for FoneFlow (bootstrap accounts, move snapshots)")]
struct Cli {
    /// Snapshot file the store persists to (also read from `FONEFLOW_SNAPSHOT`).
    #[arg(long, env = "FONEFLOW_SNAPSHOT", default_value = "./foneflow.json")]
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Admin(Admin),
    Data(Data),
}

#[derive(Args, Debug)]
struct Admin {
    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Create the first admin account. Fails once an admin exists.
    Create(AdminCreateArgs),
}

#[derive(Args, Debug)]
struct AdminCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct Data {
    #[command(subcommand)]
    command: DataCommand,
}

#[derive(Subcommand, Debug)]
enum DataCommand {
    /// Write the current snapshot to a JSON file.
    Export(DataExportArgs),
    /// Replace every collection with the contents of a JSON file.
    Import(DataImportArgs),
}

#[derive(Args, Debug)]
struct DataExportArgs {
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct DataImportArgs {
    #[arg(long)]
    input: PathBuf,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let mut engine = Engine::builder().snapshot_path(&cli.snapshot).build()?;

    match cli.command {
        Command::Admin(Admin {
            command: AdminCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;
            match engine.bootstrap_admin(&args.name, &args.email, &password) {
                Ok(id) => println!("created admin: {} ({id})", args.email),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
        Command::Data(Data {
            command: DataCommand::Export(args),
        }) => {
            let file = std::fs::File::create(&args.output)?;
            serde_json::to_writer_pretty(file, &engine.snapshot())?;
            println!("exported snapshot to {}", args.output.display());
        }
        Command::Data(Data {
            command: DataCommand::Import(args),
        }) => {
            let file = std::fs::File::open(&args.input)?;
            let snapshot = serde_json::from_reader(file)?;
            match engine.restore(snapshot) {
                Ok(()) => println!("imported snapshot from {}", args.input.display()),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
