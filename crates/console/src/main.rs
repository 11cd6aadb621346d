// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod admin;
mod commands;
mod error;
mod render;
mod watch;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use admin::{CategoryCommand, DepartmentCommand, QueueCommand, TemplateCommand, UserCommand};
use commands::{Context, TemplatePick, TicketInput};
use error::ConsoleError;
use helpdesk::Command as TicketCommand;
use helpdesk_api::{
    AdvancedSearch, ClientConfig, DEFAULT_BASE_URL, ExportFilter, ExportFormat, HelpdeskClient,
    SortOrder, TicketQuery,
};
use helpdesk_domain::{
    AssigneeFilter, ClientInfo, Priority, SlaPolicy, SlaStatus, TicketFilter, TicketStatus,
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use time::Date;
use time::macros::format_description;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_log::AsTrace;
use watch::WatchOptions;

/// Help desk console - terminal client for the ticket backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the backend API
    #[arg(long, env = "HELPDESK_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "HELPDESK_TIMEOUT_SECS", default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Session token returned by `login`
    #[arg(long, env = "HELPDESK_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

/// Client-side filters applied to a fetched queue.
#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Text matched against number, title, description and client
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    status: Option<TicketStatus>,

    #[arg(long)]
    priority: Option<Priority>,

    /// Department id
    #[arg(long)]
    department: Option<String>,

    /// Operator id, or `none` for unassigned tickets
    #[arg(long)]
    assignee: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> TicketFilter {
        let assignee: AssigneeFilter = match self.assignee.as_deref() {
            None => AssigneeFilter::Any,
            Some("none") => AssigneeFilter::Unassigned,
            Some(user) => AssigneeFilter::User(user.to_string()),
        };
        TicketFilter {
            search: self.search,
            status: self.status,
            priority: self.priority,
            department: self.department,
            assignee,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ExportKind {
    Csv,
    Json,
}

impl From<ExportKind> for ExportFormat {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Csv => Self::Csv,
            ExportKind::Json => Self::Json,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SlaKind {
    /// Within the deadline
    Ok,
    AtRisk,
    Breached,
}

impl From<SlaKind> for SlaStatus {
    fn from(kind: SlaKind) -> Self {
        match kind {
            SlaKind::Ok => Self::Within,
            SlaKind::AtRisk => Self::AtRisk,
            SlaKind::Breached => Self::Breached,
        }
    }
}

/// Filters for the server-side advanced search.
#[derive(ClapArgs, Debug)]
struct SearchArgs {
    /// Free text
    #[arg(long)]
    text: Option<String>,

    /// Fields the text is matched against, comma separated
    #[arg(long, value_delimiter = ',')]
    search_in: Vec<String>,

    /// Date the range applies to: createdAt or updatedAt
    #[arg(long)]
    date_field: Option<String>,

    /// First day, as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    from: Option<Date>,

    /// Last day, as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    to: Option<Date>,

    #[arg(long, value_delimiter = ',')]
    status: Vec<TicketStatus>,

    #[arg(long, value_delimiter = ',')]
    priority: Vec<Priority>,

    /// Department ids, comma separated
    #[arg(long, value_delimiter = ',')]
    department: Vec<String>,

    /// Operator id
    #[arg(long)]
    assigned_to: Option<String>,

    #[arg(long)]
    client_name: Option<String>,

    #[arg(long)]
    client_email: Option<String>,

    #[arg(long)]
    company: Option<String>,

    #[arg(long, value_enum)]
    sla: Option<SlaKind>,

    /// Only tickets with (true) or without (false) attachments
    #[arg(long)]
    attachments: Option<bool>,

    /// Channel the ticket came in through: web, email, api or phone
    #[arg(long)]
    source: Option<String>,

    #[arg(long)]
    sort_by: Option<String>,

    /// Oldest first
    #[arg(long)]
    asc: bool,

    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    limit: Option<u32>,
}

impl SearchArgs {
    fn into_search(self) -> AdvancedSearch {
        AdvancedSearch {
            text: self.text,
            search_in: self.search_in,
            date_field: self.date_field,
            date_from: self.from,
            date_to: self.to,
            statuses: self.status,
            priorities: self.priority,
            departments: self.department,
            assigned_to: self.assigned_to,
            client_name: self.client_name,
            client_email: self.client_email,
            client_company: self.company,
            sla_status: self.sla.map(SlaStatus::from),
            has_attachments: self.attachments,
            source: self.source,
            sort_by: self.sort_by,
            sort_order: Some(if self.asc {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            }),
            page: self.page,
            limit: self.limit,
        }
    }
}

fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the logged-in user
    Me,
    /// Change the logged-in user's password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// List the queues visible to the user
    Queues,
    /// Show a queue once
    List {
        /// Queue name; defaults to the user's first queue
        queue: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Keep a queue on screen, refreshing it periodically
    Watch {
        queue: Option<String>,
        /// Poll interval in seconds
        #[arg(long)]
        interval_secs: Option<u64>,
        /// Use the slower dashboard cadence
        #[arg(long)]
        dashboard: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List tickets through the paged listing
    Tickets {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<TicketStatus>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Search every ticket by text
    Search {
        text: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Search tickets with structured filters
    AdvancedSearch {
        #[command(flatten)]
        filters: SearchArgs,
    },
    /// Show a ticket with its comments and history
    Show { id: String },
    /// Open a ticket
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        client_name: String,
        #[arg(long)]
        client_email: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Category id; the ticket inherits its priority
        #[arg(long)]
        category: Option<String>,
        /// Open through the public intake, without category or login
        #[arg(long, conflicts_with = "category")]
        external: bool,
    },
    /// Edit a ticket's title or description
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a ticket
    Delete { id: String },
    /// Move a ticket to another status
    Status {
        id: String,
        target: TicketStatus,
        /// Justification recorded in the history
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Assign a ticket to an operator
    Assign {
        id: String,
        user: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Move a ticket to another department
    Transfer {
        id: String,
        department: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Override a ticket's priority
    Priority { id: String, priority: Priority },
    /// Categorize an uncategorized ticket
    Categorize { id: String, category: String },
    /// Comment on a ticket
    Comment {
        id: String,
        text: String,
        /// Hide the comment from the client
        #[arg(long)]
        internal: bool,
    },
    /// Comment on a ticket with a response template
    Reply {
        id: String,
        /// Template id
        #[arg(required_unless_present = "shortcut")]
        template: Option<String>,
        /// Template shortcut, with or without the leading slash
        #[arg(long, conflicts_with = "template")]
        shortcut: Option<String>,
        #[arg(long)]
        internal: bool,
    },
    /// List active response templates
    Templates,
    /// List every user
    Users,
    /// List users who can receive tickets
    Operators,
    /// List ticket categories
    Categories {
        /// Only categories the user may open tickets in
        #[arg(long)]
        for_creation: bool,
    },
    /// List departments
    Departments {
        /// Include inactive departments
        #[arg(long)]
        all: bool,
    },
    /// Manage users
    #[command(subcommand)]
    User(UserCommand),
    /// Manage ticket categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage queues
    #[command(subcommand)]
    Queue(QueueCommand),
    /// Manage departments
    #[command(subcommand)]
    Department(DepartmentCommand),
    /// Manage response templates
    #[command(subcommand)]
    Template(TemplateCommand),
    /// Print dashboard statistics
    Stats,
    /// Export tickets to a file
    Export {
        #[arg(long, value_enum, default_value_t = ExportKind::Csv)]
        format: ExportKind,
        #[arg(long)]
        status: Option<TicketStatus>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        department: Option<String>,
        /// First day, as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        start_date: Option<Date>,
        /// Last day, as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        end_date: Option<Date>,
        /// Output file; defaults to tickets-YYYY-MM-DD.<format>
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[allow(clippy::too_many_lines)]
async fn dispatch(ctx: &Context, command: Command) -> Result<(), ConsoleError> {
    match command {
        Command::Login { email, password } => commands::login(ctx, &email, &password).await,
        Command::Me => commands::me(ctx).await,
        Command::ChangePassword { current, new } => {
            commands::change_password(ctx, &current, &new).await
        }
        Command::Queues => commands::queues(ctx).await,
        Command::List { queue, filter } => commands::list(ctx, queue, &filter.into_filter()).await,
        Command::Watch {
            queue,
            interval_secs,
            dashboard,
            filter,
        } => {
            let options: WatchOptions = WatchOptions {
                interval: interval_secs.map(Duration::from_secs),
                dashboard,
            };
            watch::watch(ctx, queue, &filter.into_filter(), options).await
        }
        Command::Tickets {
            search,
            status,
            priority,
            department,
            page,
            limit,
        } => {
            let query: TicketQuery = TicketQuery {
                search,
                status,
                priority,
                department,
                page,
                limit,
            };
            commands::tickets(ctx, &query).await
        }
        Command::Search { text, page, limit } => commands::search(ctx, &text, page, limit).await,
        Command::AdvancedSearch { filters } => {
            commands::search_advanced(ctx, &filters.into_search()).await
        }
        Command::Show { id } => commands::show(ctx, &id).await,
        Command::Create {
            title,
            description,
            client_name,
            client_email,
            company,
            phone,
            category,
            external,
        } => {
            let input: TicketInput = TicketInput {
                title,
                description,
                client: ClientInfo {
                    name: client_name,
                    email: client_email,
                    company,
                    phone,
                },
                category_id: category,
                external,
            };
            commands::create(ctx, input).await
        }
        Command::Edit {
            id,
            title,
            description,
        } => commands::apply(ctx, &id, TicketCommand::Edit { title, description }).await,
        Command::Delete { id } => commands::delete(ctx, &id).await,
        Command::Status {
            id,
            target,
            description,
        } => {
            commands::apply(
                ctx,
                &id,
                TicketCommand::ChangeStatus {
                    target,
                    description,
                },
            )
            .await
        }
        Command::Assign {
            id,
            user,
            description,
        } => {
            commands::apply(
                ctx,
                &id,
                TicketCommand::Assign {
                    user_id: user,
                    description,
                },
            )
            .await
        }
        Command::Transfer {
            id,
            department,
            reason,
        } => {
            commands::apply(
                ctx,
                &id,
                TicketCommand::TransferDepartment {
                    department_id: department,
                    reason,
                },
            )
            .await
        }
        Command::Priority { id, priority } => {
            commands::apply(ctx, &id, TicketCommand::ChangePriority { priority }).await
        }
        Command::Categorize { id, category } => {
            commands::apply(
                ctx,
                &id,
                TicketCommand::Categorize {
                    category_id: category,
                },
            )
            .await
        }
        Command::Comment { id, text, internal } => {
            commands::apply(ctx, &id, TicketCommand::AddComment { text, internal }).await
        }
        Command::Reply {
            id,
            template,
            shortcut,
            internal,
        } => {
            // clap guarantees one of the two.
            let pick: TemplatePick = shortcut.map_or_else(
                || TemplatePick::Id(template.unwrap_or_default()),
                TemplatePick::Shortcut,
            );
            commands::reply(ctx, &id, pick, internal).await
        }
        Command::Templates => commands::templates(ctx).await,
        Command::Users => commands::users(ctx).await,
        Command::Operators => commands::operators(ctx).await,
        Command::Categories { for_creation } => commands::categories(ctx, for_creation).await,
        Command::Departments { all } => commands::departments(ctx, all).await,
        Command::User(command) => commands::administer(ctx, command.into()).await,
        Command::Category(command) => commands::administer(ctx, command.into()).await,
        Command::Queue(command) => commands::administer(ctx, command.into()).await,
        Command::Department(command) => commands::administer(ctx, command.into()).await,
        Command::Template(command) => commands::administer(ctx, command.into()).await,
        Command::Stats => commands::stats(ctx).await,
        Command::Export {
            format,
            status,
            priority,
            department,
            start_date,
            end_date,
            output,
        } => {
            let filter: ExportFilter = ExportFilter {
                status,
                priority,
                department,
                start_date,
                end_date,
            };
            commands::export(ctx, format.into(), &filter, output).await
        }
    }
}

fn report(err: &ConsoleError) -> String {
    match err {
        ConsoleError::Api(api) => render::error_report(api),
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Args = Args::parse();

    let level: LevelFilter = args.log_level();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::default().add_directive(level.into())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let config: ClientConfig =
        ClientConfig::new(args.api_url).with_timeout(Duration::from_secs(args.timeout_secs));
    let client: HelpdeskClient = match HelpdeskClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "Failed to build HTTP client");
            eprintln!("{}", render::error_report(&err));
            return ExitCode::FAILURE;
        }
    };
    debug!(base_url = %client.base_url(), "Client ready");

    let ctx: Context = Context {
        client: Arc::new(client),
        token: args.token,
        policy: SlaPolicy::default(),
    };

    match dispatch(&ctx, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "Command failed");
            eprintln!("{}", report(&err));
            ExitCode::FAILURE
        }
    }
}
