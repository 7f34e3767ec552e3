//! divvy-engine CLI
//!
//! Track shared expenses and settle up from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Per-participant balances from a JSON group file
//! divvy-engine stats --input trip.json
//!
//! # Who pays whom, as JSON
//! divvy-engine settle --input trip.json --format json
//!
//! # Settlement plan as CSV
//! divvy-engine settle --input trip.json --format csv --output plan.csv
//!
//! # Generate a random group for testing
//! divvy-engine generate --participants 8 --expenses 30
//! ```

use chrono::Utc;
use divvy_engine::core::group::Group;
use divvy_engine::core::participant::ParticipantName;
use divvy_engine::export::{render_report, render_stats, write_settlements_csv, write_stats_csv};
use divvy_engine::simulation::random_group::{generate_random_group, GroupConfig};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"divvy-engine — track shared expenses and settle up with minimal transfers

USAGE:
    divvy-engine <COMMAND> [OPTIONS]

COMMANDS:
    stats       Show per-participant paid/owed totals and net balances
    settle      Compute the settlement plan for a group
    generate    Generate a random group file (for testing)
    help        Show this message

OPTIONS (stats, settle):
    --input <FILE>      Path to JSON group file
    --format <FORMAT>   Output format: text (default), json or csv
    --output <FILE>     Write to file instead of stdout

OPTIONS (generate):
    --participants <N>  Number of members (default: 6)
    --expenses <N>      Number of expenses (default: 20)
    --min <AMOUNT>      Minimum expense amount (default: 5)
    --max <AMOUNT>      Maximum expense amount (default: 500)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    divvy-engine stats --input trip.json
    divvy-engine settle --input trip.json --format json
    divvy-engine settle --input trip.json --format csv --output plan.csv
    divvy-engine generate --participants 8 --expenses 30 --output trip.json"#
    );
}

/// JSON schema for input group files.
#[derive(serde::Deserialize)]
struct GroupFile {
    #[serde(default)]
    group: Option<String>,
    participants: Vec<String>,
    expenses: Vec<ExpenseInput>,
}

#[derive(serde::Deserialize)]
struct ExpenseInput {
    description: String,
    amount: String,
    payer: String,
    involved: Vec<String>,
    #[serde(default)]
    date: Option<chrono::DateTime<Utc>>,
}

/// JSON output schema for the stats command.
#[derive(serde::Serialize)]
struct StatsOutput {
    group: String,
    total_spent: String,
    balanced: bool,
    participants: Vec<StatsRowOutput>,
}

#[derive(serde::Serialize)]
struct StatsRowOutput {
    name: String,
    total_paid: String,
    total_owed: String,
    net_balance: String,
    paid_share_percent: f64,
}

/// JSON output schema for the settle command.
#[derive(serde::Serialize)]
struct SettleOutput {
    group: String,
    transfer_count: usize,
    transfer_total: String,
    settled: bool,
    transfers: Vec<TransferOutput>,
}

#[derive(serde::Serialize)]
struct TransferOutput {
    from: String,
    to: String,
    amount: String,
}

fn load_group(path: &str) -> Group {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: GroupFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(r#"{{
  "group": "Road trip",
  "participants": ["Alice", "Bob"],
  "expenses": [
    {{ "description": "Fuel", "amount": "80.00", "payer": "Alice", "involved": ["Alice", "Bob"] }}
  ]
}}"#);
        process::exit(1);
    });

    let mut group = Group::new(file.group.unwrap_or_else(|| "Group".to_string()));
    for name in file.participants {
        group
            .add_participant(ParticipantName::from(name))
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                process::exit(1);
            });
    }
    for expense in file.expenses {
        let amount: Decimal = expense.amount.parse().unwrap_or_else(|e| {
            eprintln!("Invalid amount '{}': {}", expense.amount, e);
            process::exit(1);
        });
        let payer = ParticipantName::from(expense.payer);
        let involved: Vec<ParticipantName> = expense
            .involved
            .into_iter()
            .map(ParticipantName::from)
            .collect();
        let date = expense.date.unwrap_or_else(Utc::now);
        group
            .add_expense_on(expense.description, amount, payer, involved, date)
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                process::exit(1);
            });
    }
    group
}

fn emit(content: &str, output_path: Option<String>) {
    match output_path {
        Some(path) => {
            fs::write(&path, content).unwrap_or_else(|e| {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            });
        }
        None => print!("{}", content),
    }
}

fn cmd_stats(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut output_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text', 'json' or 'csv'");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let group = load_group(&path);
    let report = group.stats();

    let content = match format.as_str() {
        "json" => {
            let participants: Vec<StatsRowOutput> = report
                .stats()
                .iter()
                .map(|s| StatsRowOutput {
                    name: s.name.to_string(),
                    total_paid: s.total_paid.to_string(),
                    total_owed: s.total_owed.to_string(),
                    net_balance: s.net_balance.to_string(),
                    paid_share_percent: report.paid_share_percent(&s.name),
                })
                .collect();
            let output = StatsOutput {
                group: group.name().to_string(),
                total_spent: report.total_spent().to_string(),
                balanced: report.is_balanced(),
                participants,
            };
            format!("{}\n", serde_json::to_string_pretty(&output).unwrap())
        }
        "csv" => {
            let mut buf = Vec::new();
            write_stats_csv(&report, &mut buf).unwrap_or_else(|e| {
                eprintln!("Error writing CSV: {}", e);
                process::exit(1);
            });
            String::from_utf8_lossy(&buf).into_owned()
        }
        "text" => render_stats(group.name(), &report),
        other => {
            eprintln!("Unknown format: {} (expected text, json or csv)", other);
            process::exit(1);
        }
    };

    emit(&content, output_path);
}

fn cmd_settle(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut output_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text', 'json' or 'csv'");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let group = load_group(&path);
    let report = group.stats();
    let plan = group.settlements();

    let content = match format.as_str() {
        "json" => {
            let transfers: Vec<TransferOutput> = plan
                .transfers()
                .iter()
                .map(|t| TransferOutput {
                    from: t.from().to_string(),
                    to: t.to().to_string(),
                    amount: t.amount().to_string(),
                })
                .collect();
            let output = SettleOutput {
                group: group.name().to_string(),
                transfer_count: plan.len(),
                transfer_total: plan.transfer_total().to_string(),
                settled: plan.settles(&report.balances()),
                transfers,
            };
            format!("{}\n", serde_json::to_string_pretty(&output).unwrap())
        }
        "csv" => {
            let mut buf = Vec::new();
            write_settlements_csv(&plan, &mut buf).unwrap_or_else(|e| {
                eprintln!("Error writing CSV: {}", e);
                process::exit(1);
            });
            String::from_utf8_lossy(&buf).into_owned()
        }
        "text" => render_report(group.name(), &report, &plan),
        other => {
            eprintln!("Unknown format: {} (expected text, json or csv)", other);
            process::exit(1);
        }
    };

    emit(&content, output_path);
}

fn cmd_generate(args: &[String]) {
    let mut participants = 6usize;
    let mut expenses = 20usize;
    let mut min_amount = Decimal::from(5);
    let mut max_amount = Decimal::from(500);
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                participants = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--participants requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--min" => {
                i += 1;
                min_amount = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--min requires an amount");
                    process::exit(1);
                });
            }
            "--max" => {
                i += 1;
                max_amount = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max requires an amount");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    if participants == 0 {
        eprintln!("--participants must be at least 1");
        process::exit(1);
    }

    let config = GroupConfig {
        participant_count: participants,
        expense_count: expenses,
        min_amount,
        max_amount,
    };

    let group = generate_random_group(&config);

    #[derive(serde::Serialize)]
    struct OutputExpense {
        description: String,
        amount: String,
        payer: String,
        involved: Vec<String>,
        date: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        group: String,
        participants: Vec<String>,
        expenses: Vec<OutputExpense>,
    }

    let output = OutputFile {
        group: group.name().to_string(),
        participants: group
            .participants()
            .iter()
            .map(|p| p.name().to_string())
            .collect(),
        expenses: group
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                description: e.description().to_string(),
                amount: e.amount().to_string(),
                payer: e.payer().to_string(),
                involved: e.involved().iter().map(|n| n.to_string()).collect(),
                date: e.date().to_rfc3339(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} members → {}",
            group.expenses().len(),
            participants,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "stats" => cmd_stats(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
