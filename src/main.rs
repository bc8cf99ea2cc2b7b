use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use exam_board::model::ExaminerKind;
use exam_board::{
    ActionKind, ActionRequest, DurabilityMode, ExamBoard, ExaminerDraft, ModuleDraft, PaperDraft,
    PaperFilter, StoreConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "exam-board")]
#[command(about = "Examination paper approval records")]
struct Cli {
    /// Directory holding the partition files (overrides EXAM_BOARD_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// sync, async or none (overrides EXAM_BOARD_DURABILITY)
    #[arg(long, global = true, value_parser = parse_durability)]
    durability: Option<DurabilityMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Examiner {
        #[command(subcommand)]
        command: ExaminerCommand,
    },
    Module {
        #[command(subcommand)]
        command: ModuleCommand,
    },
    Paper {
        #[command(subcommand)]
        command: PaperCommand,
    },
    Action {
        #[command(subcommand)]
        command: ActionCommand,
    },
    /// Rebuild paper action lists from the global action log
    Reconcile,
}

#[derive(Subcommand)]
enum ExaminerCommand {
    AddInternal {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        school: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        registration_number: u32,
    },
    AddExternal {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        institution: String,
    },
    List {
        #[arg(long, value_parser = parse_examiner_kind)]
        kind: Option<ExaminerKind>,
    },
}

#[derive(Subcommand)]
enum ModuleCommand {
    Add(ModuleArgs),
    List,
}

#[derive(Args)]
struct ModuleArgs {
    #[arg(long)]
    code: String,
    #[arg(long)]
    title: String,
    #[arg(long, default_value_t = 0)]
    registrations: u32,
    #[arg(long)]
    program_code: String,
    #[arg(long)]
    program_title: String,
    #[arg(long)]
    year: u16,
    #[arg(long)]
    school: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    internal_examiner: Uuid,
    #[arg(long)]
    external_examiner: Uuid,
}

#[derive(Subcommand)]
enum PaperCommand {
    Add {
        #[arg(long)]
        module: String,
        /// JSON file holding the paper draft
        #[arg(long)]
        draft: PathBuf,
    },
    List {
        #[arg(long)]
        module: Option<String>,
    },
}

#[derive(Subcommand)]
enum ActionCommand {
    Record {
        #[arg(long)]
        module: String,
        #[arg(long)]
        paper: Uuid,
        #[arg(long)]
        examiner: Uuid,
        #[arg(long, value_parser = parse_action_kind)]
        kind: ActionKind,
        #[arg(long, default_value = "")]
        comment: String,
    },
    List {
        #[arg(long, conflicts_with_all = ["module", "examiner"])]
        paper: Option<Uuid>,
        #[arg(long, conflicts_with = "examiner")]
        module: Option<String>,
        #[arg(long)]
        examiner: Option<Uuid>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = StoreConfig::from_env().context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config = config.data_dir(data_dir);
    }
    if let Some(durability) = cli.durability {
        config = config.durability(durability);
    }
    let board = ExamBoard::open(config)?;

    match cli.command {
        Command::Examiner { command } => run_examiner(&board, command),
        Command::Module { command } => run_module(&board, command),
        Command::Paper { command } => run_paper(&board, command),
        Command::Action { command } => run_action(&board, command),
        Command::Reconcile => {
            let report = board.reconcile()?;
            println!(
                "Scanned {} module(s), repaired {} paper(s)",
                report.modules_scanned, report.papers_repaired
            );
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("exam_board=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_examiner(board: &ExamBoard, command: ExaminerCommand) -> Result<()> {
    let draft = match command {
        ExaminerCommand::AddInternal {
            name,
            department,
            school,
            email,
            registration_number,
        } => ExaminerDraft::Internal {
            name,
            department,
            school,
            email,
            registration_number,
        },
        ExaminerCommand::AddExternal {
            name,
            department,
            institution,
        } => ExaminerDraft::External {
            name,
            department,
            institution,
        },
        ExaminerCommand::List { kind } => {
            let examiners = match kind {
                Some(kind) => board.list_examiners_of_kind(kind)?,
                None => board.list_examiners()?,
            };
            for examiner in examiners {
                println!("{}", examiner);
            }
            return Ok(());
        }
    };

    let examiner = board.create_examiner(draft)?;
    println!("{}", examiner);
    Ok(())
}

fn run_module(board: &ExamBoard, command: ModuleCommand) -> Result<()> {
    match command {
        ModuleCommand::Add(args) => {
            let module = board.create_module(ModuleDraft {
                code: args.code,
                title: args.title,
                registrations: args.registrations,
                program_code: args.program_code,
                program_title: args.program_title,
                year: args.year,
                school: args.school,
                department: args.department,
                internal_examiner_id: args.internal_examiner,
                external_examiner_id: args.external_examiner,
            })?;
            println!("{}", module);
        }
        ModuleCommand::List => {
            for module in board.list_modules()? {
                println!("{}", module);
            }
        }
    }
    Ok(())
}

fn run_paper(board: &ExamBoard, command: PaperCommand) -> Result<()> {
    match command {
        PaperCommand::Add { module, draft } => {
            let draft = read_draft(&draft)?;
            let paper = board.create_paper(&module, draft)?;
            println!("{}", paper);
        }
        PaperCommand::List { module } => {
            let filter = PaperFilter { module_code: module };
            for paper in board.list_papers(&filter)? {
                println!("{}", paper);
            }
        }
    }
    Ok(())
}

fn run_action(board: &ExamBoard, command: ActionCommand) -> Result<()> {
    match command {
        ActionCommand::Record {
            module,
            paper,
            examiner,
            kind,
            comment,
        } => {
            let action = board.record_action(ActionRequest {
                module_code: module,
                paper_id: paper,
                examiner_id: examiner,
                kind,
                comment,
            })?;
            println!("{}", action);
        }
        ActionCommand::List {
            paper,
            module,
            examiner,
        } => {
            let actions = match (paper, module, examiner) {
                (Some(paper), _, _) => board.list_actions_for_paper(paper)?,
                (_, Some(module), _) => board.list_actions_for_module(&module)?,
                (_, _, Some(examiner)) => board.list_actions_for_examiner(examiner)?,
                (None, None, None) => board.list_all_actions()?,
            };
            for action in actions {
                println!("{}", action);
            }
        }
    }
    Ok(())
}

fn read_draft(path: &Path) -> Result<PaperDraft> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read paper draft '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse paper draft '{}'", path.display()))
}

fn parse_durability(raw: &str) -> Result<DurabilityMode> {
    DurabilityMode::from_str(raw).ok_or_else(|| anyhow!("Expected sync, async or none, got '{}'", raw))
}

fn parse_examiner_kind(raw: &str) -> Result<ExaminerKind> {
    ExaminerKind::from_str(raw).ok_or_else(|| anyhow!("Expected internal or external, got '{}'", raw))
}

fn parse_action_kind(raw: &str) -> Result<ActionKind> {
    ActionKind::from_str(raw)
        .ok_or_else(|| anyhow!("Expected add-comment, approve or reject, got '{}'", raw))
}
