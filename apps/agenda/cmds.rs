use clap::{arg, Arg, Command};

pub(crate) fn list_cli() -> Command {
    Command::new("list")
        .about("List all contacts")
}

pub(crate) fn set_cli() -> Command {
    Command::new("set")
        .about("Set one field of the new contact form")
        .arg(arg!(<FIELD> "The form field to set")
                .value_parser(["name", "phone", "email", "tag"])
        )
        .arg(Arg::new("VALUE")
                .help("The field value, empty to clear it")
                .num_args(0..)
                .required(false)
        )
        .arg_required_else_help(true)
}

pub(crate) fn form_cli() -> Command {
    Command::new("form")
        .about("Show the new contact form")
}

pub(crate) fn submit_cli() -> Command {
    Command::new("submit")
        .about("Validate the form and save the contact")
}

pub(crate) fn delete_cli() -> Command {
    Command::new("delete")
        .about("Delete a contact")
        .arg(arg!(<ID> "The contact id to be removed"))
        .arg_required_else_help(true)
}

pub(crate) fn status_cli() -> Command {
    Command::new("status")
        .about("Show loading and error state")
}
