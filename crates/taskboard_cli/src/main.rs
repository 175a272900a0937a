//! CLI probe for the task board core.
//!
//! # Responsibility
//! - Open a board database (file or in-memory) and print the board.
//! - Apply at most one mutation per invocation for quick local checks.

use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use taskboard_core::db::{open_db, open_db_in_memory};
use taskboard_core::{
    core_version, default_log_level, init_logging, Board, BoardRepository, BoardStore, KvStore,
    SqliteKvStore,
};

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Inspect and edit a task board")]
struct Cli {
    /// SQLite file holding the board. In-memory when omitted.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the board.
    Show,
    AddColumn {
        title: String,
    },
    DeleteColumn {
        column_id: String,
    },
    AddTask {
        column_id: String,
        title: String,
        #[arg(default_value = "")]
        description: String,
    },
    DeleteTask {
        task_id: String,
    },
    MoveTask {
        task_id: String,
        column_id: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().as_str().to_string());
        if let Err(err) = init_logging(&level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let opened = match cli.db.as_ref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open board database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = BoardStore::open(BoardRepository::new(SqliteKvStore::new(&conn)));
    println!("taskboard_core version={}", core_version());
    println!("board source={}", store.load_source().as_str());

    let command = cli.command.unwrap_or(Command::Show);
    let changed = apply(&mut store, &command);
    info!("event=cli_command module=cli status=ok command={command:?} changed={changed}");
    if !changed && !matches!(command, Command::Show) {
        println!("no change");
    }

    print!("{}", render_board(store.board()));
    ExitCode::SUCCESS
}

fn apply<S: KvStore>(store: &mut BoardStore<S>, command: &Command) -> bool {
    match command {
        Command::Show => false,
        Command::AddColumn { title } => store.add_column(title).is_some(),
        Command::DeleteColumn { column_id } => store.delete_column(column_id),
        Command::AddTask {
            column_id,
            title,
            description,
        } => store.add_task(column_id, title, description).is_some(),
        Command::DeleteTask { task_id } => store.delete_task(task_id),
        Command::MoveTask { task_id, column_id } => store.move_task(task_id, column_id).is_some(),
    }
}

fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for column in board.columns() {
        out.push_str(&format!(
            "[{}] {} ({})\n",
            column.id,
            column.title,
            column.tasks.len()
        ));
        for task in &column.tasks {
            out.push_str(&format!("  - [{}] {}\n", task.id, task.title));
            if !task.description.is_empty() {
                out.push_str(&format!("      {}\n", task.description));
            }
        }
    }
    out
}
