use clap::{Parser, Subcommand};
use cli::student::StudentClient;

#[derive(Parser)]
#[command(name = "students-cli")]
#[command(about = "CLI for registering and listing students", long_about = None)]
struct Cli {
    /// Student registry API URL
    #[arg(long, global = true, default_value = "http://localhost:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new student
    Register {
        /// Student name
        #[arg(short, long)]
        name: String,
        /// Registration number (RA)
        #[arg(short, long)]
        ra: String,
    },
    /// List all registered students
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = StudentClient::new(cli.api_url);

    match cli.command {
        Commands::Register { name, ra } => {
            let student = client.register(name, ra).await?;
            println!("✓ Registered {} (RA {})", student.name, student.ra);
            println!("Student ID: {}", student.id);
        }
        Commands::List => {
            let students = client.list().await?;

            if students.is_empty() {
                println!("No students registered");
            } else {
                println!("Students:");
                for student in students {
                    println!("  {}. {} (RA {})", student.id, student.name, student.ra);
                }
            }
        }
    }

    Ok(())
}
