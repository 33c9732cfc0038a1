use std::error::Error;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

use daylist::clock::{Clock, SystemClock};
use daylist::settings;
use daylist::status;
use daylist::store::{LocalStore, Store};
use daylist::utils::print_day;
use daylist::{DayViewController, TaskFields, TaskFilter, TaskId};

type Controller = DayViewController<LocalStore, SystemClock>;

const USAGE: &str = "\
Usage: daylist [--store <path>] <command>

Commands:
    list   [YYYY-MM-DD] [all|active|completed]
    add    <YYYY-MM-DD> [HH:MM] <name...>
    edit   <id> <YYYY-MM-DD> [HH:MM] <name...>
    toggle <id>
    icon   <id> [symbol|none]
    delete <id>
    icons";


#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(args).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(mut args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let store_path = take_store_path(&mut args)?;
    log::debug!("Using store {:?}", store_path);

    // The controller owns the store until the process exits
    let store = LocalStore::open(&store_path)?;
    let mut controller = DayViewController::new(store, SystemClock);

    let command = match args.first() {
        None => {
            println!("{}", USAGE);
            return Ok(());
        },
        Some(command) => command.clone(),
    };
    let params = &args[1..];

    match command.as_str() {
        "list" => list(&mut controller, params).await,
        "add" => add(&mut controller, params).await,
        "edit" => edit(&mut controller, params).await,
        "toggle" => {
            let id = parse_id(params.first())?;
            let completed_at = controller.toggle_completion(&id).await?;
            match completed_at {
                Some(at) => println!("Completed at {}", at),
                None => println!("Marked as to do"),
            }
            show_day_of(&mut controller, &id).await
        },
        "icon" => {
            let id = parse_id(params.first())?;
            let icon = match params.get(1).map(String::as_str) {
                None => {
                    // Only show what an icon picker would start from
                    let task = controller.store().get(&id).await?.ok_or_else(|| format!("No task {}", id))?;
                    println!("{}", status::picker_icon(&task));
                    return Ok(());
                },
                Some("none") => None,
                Some(icon) => {
                    if !settings::is_catalogued_icon(icon) {
                        log::warn!("{:?} is not one of the usual icons (see `daylist icons`)", icon);
                    }
                    Some(icon.to_string())
                },
            };
            controller.set_icon(&id, icon).await?;
            show_day_of(&mut controller, &id).await
        },
        "delete" => {
            let id = parse_id(params.first())?;
            controller.delete_task(&id).await?;
            println!("Deleted {}", id);
            Ok(())
        },
        "icons" => {
            for icon in settings::ICON_CATALOGUE.iter() {
                println!("{}", icon);
            }
            Ok(())
        },
        other => Err(format!("Unknown command {:?}\n\n{}", other, USAGE).into()),
    }
}

/// Remove `--store <path>` from the arguments, or fall back to the environment and the default path
fn take_store_path(args: &mut Vec<String>) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(index) = args.iter().position(|arg| arg == "--store") {
        if index + 1 >= args.len() {
            return Err("--store requires a path".into());
        }
        let path = args.remove(index + 1);
        args.remove(index);
        return Ok(PathBuf::from(path));
    }

    match std::env::var_os(settings::STORE_PATH_ENV_VAR) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(settings::default_store_path()),
    }
}

async fn list(controller: &mut Controller, params: &[String]) -> Result<(), Box<dyn Error>> {
    let mut date = controller.clock().today();
    for param in params {
        match parse_date(param) {
            Ok(d) => date = d,
            Err(_) => controller.set_filter(param.parse::<TaskFilter>()?),
        }
    }
    controller.set_date(date).await?;
    print_day(controller);
    Ok(())
}

async fn add(controller: &mut Controller, params: &[String]) -> Result<(), Box<dyn Error>> {
    let date = parse_date(params.first().ok_or("Missing due date")?)?;
    let fields = parse_fields(date, &params[1..])?;

    let id = controller.create_task(fields).await?;
    println!("Created {}", id);
    controller.set_filter(TaskFilter::All);
    controller.set_date(date).await?;
    print_day(controller);
    Ok(())
}

async fn edit(controller: &mut Controller, params: &[String]) -> Result<(), Box<dyn Error>> {
    let id = parse_id(params.first())?;
    let date = parse_date(params.get(1).ok_or("Missing due date")?)?;
    let fields = parse_fields(date, &params[2..])?;

    controller.update_task(&id, fields).await?;
    controller.set_filter(TaskFilter::All);
    controller.set_date(date).await?;
    print_day(controller);
    Ok(())
}

/// Move to the day a task is due, and print it
async fn show_day_of(controller: &mut Controller, id: &TaskId) -> Result<(), Box<dyn Error>> {
    if let Some(task) = controller.store().get(id).await? {
        controller.set_filter(TaskFilter::All);
        controller.set_date(task.due_day()).await?;
        print_day(controller);
    }
    Ok(())
}

/// `[HH:MM] <name...>`
fn parse_fields(date: NaiveDate, params: &[String]) -> Result<TaskFields, Box<dyn Error>> {
    let (time, words) = match params.first().map(|p| NaiveTime::parse_from_str(p, "%H:%M")) {
        Some(Ok(time)) => (Some(time), &params[1..]),
        _ => (None, params),
    };

    let name = words.join(" ");
    Ok(match time {
        Some(time) => TaskFields::scheduled(name, date.and_time(time)),
        None => TaskFields::new(name, date),
    })
}

fn parse_date(param: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(param, "%Y-%m-%d")
}

fn parse_id(param: Option<&String>) -> Result<TaskId, Box<dyn Error>> {
    let param = param.ok_or("Missing task id")?;
    Ok(param.parse::<TaskId>()?)
}
