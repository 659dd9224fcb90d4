use clap::{error, Parser, ArgMatches, Command};
use reedline::{Reedline, Signal};

mod prompt;
use prompt::AgendaPrompt;

mod cmds;

use agenda::{
    configuration as cfg,
    logger,
    view,
    ApiClient,
    App,
    ContactForm,
    ContactId,
    Field,
    Submission,
};

type AgendaApp = App<ApiClient>;

enum Step {
    Run(Vec<String>),
    Skip,
    Quit(&'static str),
}

/// Turns one read from the line editor into the next shell action. A
/// failed read ends the shell.
fn next_step(read: std::io::Result<Signal>) -> Step {
    let sig = match read {
        Ok(sig) => sig,
        Err(_) => return Step::Quit("\n Fatal error occurred."),
    };

    match sig {
        Signal::Success(line) => match line.trim() {
            "" => Step::Skip,
            "exit" | "quit" => Step::Quit("Goodbye!"),
            input => Step::Run(input.split_whitespace().map(|s| s.to_string()).collect()),
        },
        Signal::CtrlC | Signal::CtrlD => Step::Quit("\nGoodbye!"),
    }
}

fn build_cli() -> Command {
    let mut cmd = Command::new("agenda")
        .about("Interactive contact book")
        .no_binary_name(true)
        .subcommand_required(true)
        .subcommand(cmds::list_cli())
        .subcommand(cmds::set_cli())
        .subcommand(cmds::form_cli())
        .subcommand(cmds::submit_cli())
        .subcommand(cmds::delete_cli())
        .subcommand(cmds::status_cli())
        .help_template("{subcommands}");

    cmd.error(error::ErrorKind::InvalidSubcommand, "Invalid command provided");
    cmd
}

async fn execute_command(matches: ArgMatches, app: &AgendaApp, form: &ContactForm) {
    match matches.subcommand() {
        Some(("list", _)) => {
            let cards = app.cards();
            if cards.is_empty() {
                println!("No contacts yet. Add the first one with `set` and `submit`.");
                return;
            }
            println!("Contacts (total:{}):", cards.len());
            for card in cards.iter() {
                println!("{}", card);
            }
        }

        Some(("set", m)) => {
            let Some(name) = m.get_one::<String>("FIELD") else {
                return;
            };
            let Ok(field) = name.parse::<Field>() else {
                println!("Error: invalid field: {}", name);
                return;
            };
            let value = m.get_many::<String>("VALUE")
                .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            form.set_field(field, &value);
        }

        Some(("form", _)) => {
            println!("{}", view::render_form(form));
        }

        Some(("submit", _)) => {
            match form.submit(app).await {
                Submission::Invalid(errors) => {
                    println!("Please fix the form:");
                    for (field, msg) in errors.failed() {
                        println!(" {}: {}", field, msg);
                    }
                }
                Submission::Busy => println!("Saving..."),
                Submission::Submitted => println!("[OK] Contact saved."),
                Submission::Failed(e) => println!("Error saving contact: {}", e),
            }
        }

        Some(("delete", m)) => {
            let Some(id) = m.get_one::<String>("ID") else {
                return;
            };
            let id = ContactId::from(id.as_str());
            let cards = app.cards();
            let Some(card) = cards.iter().find(|c| c.id() == &id) else {
                println!("No contact found with id: {}", id);
                return;
            };

            card.delete().await;
            if app.find(&id).is_none() {
                println!("Contact {} is deleted.", id);
            }
        }

        Some(("status", _)) => {
            println!(" loading:\t{}", app.is_loading());
            println!(" contacts:\t{}", app.contacts().len());
            println!(" submitting:\t{}", form.is_submitting());
            println!(" error:\t\t{}", app.error().unwrap_or_default());
        }
        _ => println!("Unknown command"),
    }
}

#[derive(Parser, Debug)]
#[command(name = "agenda")]
#[command(version = "1.0")]
#[command(about = "Agenda interactive contact book", long_about = None)]
struct Options {
    /// The configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// The contacts endpoint, overriding the configuration
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    let opts = Options::parse();
    let mut builder = cfg::Builder::new();
    if let Some(path) = opts.config.as_ref() {
        if let Err(e) = builder.load(path) {
            eprintln!("{e}");
            return;
        }
    }
    if let Some(url) = opts.url.as_deref() {
        builder.with_api_base_url(url);
    }

    let cfg = match builder.build() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Loading configuration error: {e}");
            return;
        }
    };

    #[cfg(feature = "inspect")] {
        cfg.dump();
    }

    if let Err(e) = logger::setup(cfg.log_level(), cfg.log_file()) {
        eprintln!("Setting up logger error: {e}");
        return;
    }

    let client = match ApiClient::new(cfg.api_base_url()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Creating api client error: {e}");
            return;
        }
    };

    let info = cfg.app_info();
    println!("Contact book | course {}", info.course());
    println!("{}", info.title());
    println!("{}\n", info.subtitle());

    let app = App::new(client);
    let form = ContactForm::new();

    println!("Loading contacts...");
    if let Err(e) = app.load().await {
        eprintln!("Loading contacts error: {e}");
    }
    match app.error() {
        Some(msg) => println!("Error: {}", msg),
        None => println!("{} contacts loaded.", app.contacts().len()),
    }

    let mut cli = build_cli();
    let mut rl = Reedline::create();
    let prompt = AgendaPrompt::new(&app, &form);

    println!("Welcome to the contact book shell. Type 'exit' to quit.\n");

    loop {
        let args = match next_step(rl.read_line(&prompt)) {
            Step::Run(args) => args,
            Step::Skip => continue,
            Step::Quit(msg) => {
                println!("{}", msg);
                break;
            }
        };

        if args[0] == "help" {
            _ = match args.get(1).and_then(|v| cli.find_subcommand_mut(v)) {
                Some(cmd) => cmd.print_long_help(),
                None => cli.print_long_help(),
            };
            continue;
        }

        let cmd = args.join(" ");
        match cli.clone().try_get_matches_from(args) {
            Ok(matches) => execute_command(matches, &app, &form).await,
            Err(_) => {
                println!("Error: command not found: '{}'", cmd);
                continue;
            }
        }

        if let Some(msg) = app.error() {
            println!("Error: {}", msg);
        }
    }

    logger::teardown();
}
