//! Interactive habit tracker shell.
//!
//! # Responsibility
//! - Drive the numbered menu loop over stdin/stdout against
//!   `habitual_core`.
//! - Resolve the backing-file path and bootstrap logging.
//! - Keep the session alive through per-action failures; only a store that
//!   cannot be opened at all aborts startup.

use habitual_core::{
    default_log_level, init_logging, now_local, HabitService, JsonHabitStore, LoadOutcome,
    Periodicity, ServiceError, StoreError,
};
use log::{error, warn};
use std::io::{BufRead, Write};

/// Environment override for the backing-file path.
const STORE_FILE_ENV: &str = "HABITUAL_FILE";
/// Backing file in the working directory when no override is set.
const DEFAULT_STORE_FILE: &str = "habits.json";

fn main() {
    // Logging is best-effort; the shell stays usable without it.
    if let Err(err) = init_logging(default_log_level(), &log_dir().to_string_lossy()) {
        eprintln!("Warning: logging disabled ({err})");
    }

    let path =
        std::env::var(STORE_FILE_ENV).unwrap_or_else(|_| DEFAULT_STORE_FILE.to_string());
    let store = match JsonHabitStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            error!("event=shell_start module=cli status=error error={err}");
            eprintln!("Cannot open habit storage at `{path}`: {err}");
            std::process::exit(1);
        }
    };

    if let LoadOutcome::Recovered(reason) = store.load_outcome() {
        println!("Warning: could not read `{path}` ({reason}); starting with an empty list.");
    }

    let mut service = HabitService::new(store);
    match service.seed_if_empty(now_local()) {
        Ok(0) => {}
        Ok(count) => println!("Created {count} example habits to get you started."),
        Err(err) => {
            warn!("event=store_seed module=cli status=error error={err}");
            println!("Could not create example habits: {err}");
        }
    }

    let stdin = std::io::stdin();
    run_shell(&mut service, &mut stdin.lock());
}

/// Log directory next to the user's data, with a tmp fallback when the
/// working directory is unavailable.
fn log_dir() -> std::path::PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => cwd.join("logs"),
        Err(_) => std::env::temp_dir().join("habitual-logs"),
    }
}

/// Menu loop. EOF anywhere behaves like choosing "Exit".
fn run_shell(service: &mut HabitService, input: &mut impl BufRead) {
    loop {
        let Some(choice) = display_menu(input) else {
            println!("Goodbye!");
            return;
        };
        match choice.as_str() {
            "1" => view_all_habits(service),
            "2" => add_habit(service, input),
            "3" => check_off_habit(service, input),
            "4" => view_habit_details(service, input),
            "5" => view_habits_by_periodicity(service, input),
            "6" => remove_habit(service, input),
            "7" => {
                println!("Goodbye!");
                return;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn display_menu(input: &mut impl BufRead) -> Option<String> {
    println!("\n=== Habit Tracker ===");
    println!("1. View all habits");
    println!("2. Add new habit");
    println!("3. Check off habit");
    println!("4. View habit details");
    println!("5. View habits by periodicity");
    println!("6. Remove habit");
    println!("7. Exit");
    prompt(input, "Choose an option (1-7): ")
}

/// Prints `text` without a newline and reads one input line.
///
/// Returns `None` on EOF or a read failure; the trailing line break is
/// stripped, nothing else.
fn prompt(input: &mut impl BufRead, text: &str) -> Option<String> {
    print!("{text}");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

fn view_all_habits(service: &HabitService) {
    println!("\n=== All Habits ===");
    if service.habits().is_empty() {
        println!("No habits found.");
        return;
    }

    let now = now_local();
    for habit in service.habits() {
        let status = if habit.is_completed_for_period(now) {
            "✓"
        } else {
            "✗"
        };
        println!("{status} {} ({})", habit.name, habit.periodicity);
    }
}

fn add_habit(service: &mut HabitService, input: &mut impl BufRead) {
    println!("\n=== Add New Habit ===");
    let Some(name) = prompt(input, "Enter habit name: ") else {
        return;
    };

    // Early check to spare the user the remaining prompts; `create_habit`
    // still enforces uniqueness underneath.
    if service.habit(&name).is_some() {
        println!("A habit with this name already exists.");
        return;
    }

    let Some(description) = prompt(input, "Enter habit description: ") else {
        return;
    };

    println!("\nSelect periodicity:");
    println!("1. Daily");
    println!("2. Weekly");
    let Some(choice) = prompt(input, "Choose (1-2): ") else {
        return;
    };
    let periodicity = match choice.as_str() {
        "1" => Periodicity::Daily,
        "2" => Periodicity::Weekly,
        _ => {
            println!("Invalid choice. Habit not created.");
            return;
        }
    };

    match service.create_habit(&name, description, periodicity) {
        Ok(()) => println!("Habit '{name}' created successfully!"),
        Err(ServiceError::Store(StoreError::DuplicateName(_))) => {
            println!("A habit with this name already exists.");
        }
        Err(err) => println!("Could not create habit: {err}"),
    }
}

fn check_off_habit(service: &mut HabitService, input: &mut impl BufRead) {
    println!("\n=== Check Off Habit ===");
    view_all_habits(service);
    if service.habits().is_empty() {
        return;
    }

    let Some(name) = prompt(input, "\nEnter habit name to check off: ") else {
        return;
    };
    match service.check_off(&name, now_local()) {
        Ok(true) => println!("Habit '{name}' checked off!"),
        Ok(false) => println!("Habit not found."),
        Err(err) => println!("Could not save the check-off: {err}"),
    }
}

fn view_habit_details(service: &HabitService, input: &mut impl BufRead) {
    println!("\n=== Habit Details ===");
    let Some(name) = prompt(input, "Enter habit name: ") else {
        return;
    };

    match service.habit_detail(&name, now_local()) {
        Some(detail) => {
            println!("\nName: {}", detail.name);
            println!("Description: {}", detail.description);
            println!("Periodicity: {}", detail.periodicity);
            println!("Created: {}", detail.created_at.format("%Y-%m-%d"));
            println!(
                "Current streak: {} {} periods",
                detail.current_streak, detail.periodicity
            );
            println!(
                "Completed this period: {}",
                if detail.completed_this_period {
                    "Yes"
                } else {
                    "No"
                }
            );
        }
        None => println!("Habit not found."),
    }
}

fn view_habits_by_periodicity(service: &HabitService, input: &mut impl BufRead) {
    println!("\n=== View Habits by Periodicity ===");
    println!("1. Daily habits");
    println!("2. Weekly habits");
    let Some(choice) = prompt(input, "Choose (1-2): ") else {
        return;
    };
    let (periodicity, header) = match choice.as_str() {
        "1" => (Periodicity::Daily, "\n=== Daily Habits ==="),
        "2" => (Periodicity::Weekly, "\n=== Weekly Habits ==="),
        _ => {
            println!("Invalid choice.");
            return;
        }
    };

    println!("{header}");
    let habits = service.habits_by_periodicity(periodicity);
    if habits.is_empty() {
        println!("No habits found.");
        return;
    }

    let now = now_local();
    for habit in habits {
        let status = if habit.is_completed_for_period(now) {
            "✓"
        } else {
            "✗"
        };
        println!("{status} {}", habit.name);
    }
}

fn remove_habit(service: &mut HabitService, input: &mut impl BufRead) {
    println!("\n=== Remove Habit ===");
    view_all_habits(service);
    if service.habits().is_empty() {
        return;
    }

    let Some(name) = prompt(input, "\nEnter habit name to remove: ") else {
        return;
    };
    match service.remove_habit(&name) {
        Ok(true) => println!("Habit '{name}' removed successfully!"),
        Ok(false) => println!("Habit not found."),
        Err(err) => println!("Could not remove the habit: {err}"),
    }
}
