//! scolaris CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "scolaris", version, about = "School academic-records engine")]
struct Cli {
    /// Path to the school data file (JSON snapshot)
    #[arg(long, global = true, default_value = "school.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a student's transcript
    Transcript {
        /// Student id
        #[arg(long)]
        student: u64,
    },

    /// Print the jury board for a classroom (read-only preview)
    Board {
        /// Classroom id
        #[arg(long)]
        classroom: u64,
    },

    /// Record a jury decision and validate one student
    ValidateStudent {
        /// Student id
        #[arg(long)]
        student: u64,

        /// Jury decision text (may override the computed decision)
        #[arg(long)]
        decision: String,
    },

    /// Validate every student of a classroom with computed decisions
    ValidateClassroom {
        /// Classroom id
        #[arg(long)]
        classroom: u64,

        /// Overwrite students already validated by the jury
        #[arg(long)]
        force: bool,
    },

    /// Import students from a CSV file
    ImportStudents {
        /// CSV file: firstName;lastName;email;username;CNE;classCode
        #[arg(long)]
        file: PathBuf,

        /// Column separator
        #[arg(long, default_value = ";")]
        separator: char,
    },

    /// Import grades for one evaluation from a CSV file
    ImportGrades {
        /// CSV file: CNE;score
        #[arg(long)]
        file: PathBuf,

        /// Target evaluation id
        #[arg(long)]
        evaluation: u64,

        /// Column separator
        #[arg(long, default_value = ";")]
        separator: char,
    },

    /// Fetch orientation recommendations for a student
    Recommend {
        /// Student id
        #[arg(long)]
        student: u64,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Ask the schedule service to optimize a classroom's timetable
    OptimizeSchedule {
        /// Classroom id
        #[arg(long)]
        classroom: u64,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scolaris=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transcript { student } => commands::transcript::execute(&cli.data, student),
        Commands::Board { classroom } => commands::board::execute(&cli.data, classroom),
        Commands::ValidateStudent { student, decision } => {
            commands::validate::student(&cli.data, student, &decision)
        }
        Commands::ValidateClassroom { classroom, force } => {
            commands::validate::classroom(&cli.data, classroom, force)
        }
        Commands::ImportStudents { file, separator } => {
            commands::import::students(&cli.data, &file, separator)
        }
        Commands::ImportGrades {
            file,
            evaluation,
            separator,
        } => commands::import::grades(&cli.data, &file, evaluation, separator),
        Commands::Recommend { student, config } => {
            commands::recommend::execute(&cli.data, student, config.as_deref()).await
        }
        Commands::OptimizeSchedule { classroom, config } => {
            commands::schedule::execute(&cli.data, classroom, config.as_deref()).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
