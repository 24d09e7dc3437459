use admission_sheet_core::app::form::{run_submit, SubmitOutcome};
use admission_sheet_core::app::{probe_connection, FormController};
use admission_sheet_core::config::{self, ApiConfig};
use admission_sheet_core::error::Result;
use admission_sheet_core::interface::{HttpClient, SheetApi};
use admission_sheet_core::model::{ConnectionStatus, Field, NotificationKind};
use admission_sheet_core::{DemoClient, ReqwestClient};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

const LOG_VAR: &str = "SHEET_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    if config::demo_mode_from_env() {
        println!("DEMO MODE: rows are logged, nothing is sent");
        return run(DemoClient::default()).await;
    }

    let config = ApiConfig::from_env()?;
    println!("Endpoint: {}", config.endpoint);
    let client = ReqwestClient::new(config).await?;
    run(client).await
}

fn init_logging() {
    let level = std::env::var(LOG_VAR)
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();
}

async fn run<A: SheetApi>(api: A) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut form = FormController::new();

    println!("==================Student Admission Form==================");

    // The initial probe runs while the user is filling in the form.
    let ticket = form.begin_probe();
    let (status, entries) = tokio::join!(probe_connection(&api), prompt_fields(&mut input));
    if let Some(ticket) = ticket {
        form.finish_probe(ticket, status);
    }
    for (field, value) in entries? {
        form.update_field(field, value);
    }

    print_status(&form);
    print_help();

    while let Some(line) = prompt(&mut input, "> ").await? {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command {
            "" => continue,
            "set" => set_field(&mut form, rest.trim()),
            "show" => print_record(&form),
            "submit" => submit_form(&mut form, &api).await,
            "probe" => {
                println!("Testing...");
                form.probe(&api).await;
                print_status(&form);
            }
            "dismiss" => form.dismiss_notification(),
            "reset" => {
                form.reset();
                print_record(&form);
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command `{other}`, type `help`"),
        }
    }

    Ok(())
}

async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    print!("{text}");
    std::io::Write::flush(&mut std::io::stdout())?;
    Ok(input.next_line().await?)
}

async fn prompt_fields(input: &mut Input) -> Result<Vec<(Field, String)>> {
    let mut entries = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        match prompt(input, &format!("{}: ", field.label())).await? {
            Some(value) => entries.push((field, value.trim().to_string())),
            None => break,
        }
    }
    Ok(entries)
}

fn set_field(form: &mut FormController, args: &str) {
    let (name, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    match name.parse::<Field>() {
        Ok(field) => {
            if !form.update_field(field, value.trim()) {
                println!("Form is busy, try again");
            }
        }
        Err(e) => println!("{e}"),
    }
}

async fn submit_form<A: SheetApi>(form: &mut FormController, api: &A) {
    let Some(ticket) = form.begin_submit() else {
        print_notification(form);
        return;
    };

    println!("Submitting...");
    let outcome = run_submit(api, ticket.record()).await;
    let failure = match &outcome {
        SubmitOutcome::Finished(result) => result.failure,
        SubmitOutcome::Aborted => None,
    };
    form.finish_submit(ticket, outcome);

    print_notification(form);
    if let Some(kind) = failure {
        println!("==================Troubleshooting==================");
        for (i, step) in kind.troubleshooting().iter().enumerate() {
            println!("{}. {step}", i + 1);
        }
    }
}

fn print_status(form: &FormController) {
    let badge = if form.is_probing() {
        "Testing..."
    } else {
        match form.connection_status() {
            ConnectionStatus::Connected => "API Connected",
            ConnectionStatus::Error => "API Error",
            ConnectionStatus::Unknown => "Unknown",
        }
    };
    println!("API Status: [{badge}]");
}

fn print_record(form: &FormController) {
    println!("============================================");
    for field in Field::ALL {
        println!("{:<16}{:<14}{}", field.label(), field.name(), form.record().get(field));
    }
    println!("============================================");
}

fn print_notification(form: &FormController) {
    match form.notification() {
        Some(note) if note.kind == NotificationKind::Success => println!("[OK] {}", note.message),
        Some(note) => println!("[ERROR] {}", note.message),
        None => {}
    }
}

fn print_help() {
    println!("Commands:");
    println!("  set <field> <value>   e.g. set phoneNumber 0300 1234567");
    println!("  show | submit | probe | dismiss | reset | help | quit");
    let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
    println!("Fields: {}", names.join(", "));
}
