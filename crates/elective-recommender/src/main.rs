// elective-recommender/crates/elective-recommender/src/main.rs

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use elective_recommender::{telemetry, Config, RecommendationApi};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "elective-recommender", about = "Elective course recommendation engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Command {
    /// Register a course and recompute its tags and embeddings
    RegisterCourse {
        name: String,
        description: String,
    },
    /// Edit an existing course
    EditCourse {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show one course
    ShowCourse { id: u32 },
    /// List all registered courses
    ListCourses,
    /// Register a student with declared interests and a free-text description
    RegisterStudent {
        name: String,
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit an existing student
    EditStudent {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show one student
    ShowStudent { id: u32 },
    /// Print the predefined interest vocabulary
    ListTags,
    /// Recommend the top-n courses for a student
    Recommend {
        student_id: u32,
        #[arg(short, default_value_t = 3)]
        n: usize,
    },
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let cli = Cli::parse();
    let api = RecommendationApi::new(Config::from_env()?);

    match cli.command {
        Command::RegisterCourse { name, description } => {
            let id = api.register_course(&name, &description).await?;
            println!("{}", id);
        }
        Command::EditCourse { id, name, description } => {
            api.edit_course(id, name.as_deref(), description.as_deref()).await?;
            println!("ok");
        }
        Command::ShowCourse { id } => {
            println!("{}", serde_json::to_string_pretty(&api.get_course(id)?)?);
        }
        Command::ListCourses => {
            println!("{}", serde_json::to_string_pretty(&api.get_all_courses()?)?);
        }
        Command::RegisterStudent { name, tags, description } => {
            let id = api.register_student(&name, &tags, &description).await?;
            println!("{}", id);
        }
        Command::EditStudent { id, name, tags, description } => {
            api.edit_student(id, name.as_deref(), tags.as_deref(), description.as_deref())
                .await?;
            println!("ok");
        }
        Command::ShowStudent { id } => {
            println!("{}", serde_json::to_string_pretty(&api.get_student(id)?)?);
        }
        Command::ListTags => {
            for tag in api.get_predefined_tags() {
                println!("{}", tag);
            }
        }
        Command::Recommend { student_id, n } => {
            let ranking = api.recommend_top_courses(student_id, n).await?;
            println!("{}", serde_json::to_string_pretty(&ranking)?);
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    println!("CLI feature not enabled. Enable with --features cli");
}
