//! Terminal commands standing in for page clicks.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast;

use crate::connector::ProviderEvent;
use crate::controller::{PageAction, PageController};
use crate::ui::{ElementId, MemoryPage};

#[derive(Parser, Debug)]
#[command(name = "ticket-minter", no_binary_name = true, disable_help_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// One line typed at the prompt.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Connect a wallet provider
    Connect {
        /// Provider option to use
        provider: Option<String>,
    },
    /// Disconnect the wallet
    Disconnect,
    /// Reload network, account and balance
    Refresh,
    /// Mint a token for RECIPIENT keyed by TICKET (the rest of the line)
    CreateToken {
        recipient: String,
        ticket: String,
    },
    /// Click a page button by element id
    Click {
        /// Element id, with or without the leading `#`
        element: String,
    },
    /// List provider options
    Providers,
    /// Print the page
    Show,
    /// Exit
    Quit,
}

/// Parse a prompt line.
///
/// The ticket of `create-token` is everything after the recipient, kept as
/// typed apart from the separating whitespace.
pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
    let (name, rest) = split_word(line.trim_start());
    if name != "create-token" {
        return CommandLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command);
    }

    let (recipient, ticket) = split_word(rest.trim_start());
    let ticket = ticket.trim_start();
    // `--` keeps a ticket such as `-vip-` from being read as a flag.
    let args = [name, "--", recipient, ticket]
        .into_iter()
        .filter(|arg| !arg.is_empty());
    CommandLine::try_parse_from(args).map(|parsed| parsed.command)
}

fn split_word(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace).unwrap_or((text, ""))
}

/// Run a command against the controller. Returns `false` once the user
/// asked to quit.
pub async fn run_command(controller: &mut PageController<MemoryPage>, command: Command) -> bool {
    match command {
        Command::Connect { provider } => controller.dispatch(PageAction::Connect(provider)).await,
        Command::Disconnect => controller.dispatch(PageAction::Disconnect).await,
        Command::Refresh => controller.dispatch(PageAction::Refresh).await,
        Command::CreateToken { recipient, ticket } => {
            let page = controller.page_mut();
            page.set_input(ElementId::TokenRecipient, &recipient);
            page.set_input(ElementId::Ticket, &ticket);
            controller.dispatch(PageAction::CreateToken).await;
        }
        Command::Click { element } => {
            match ElementId::from_id(&element).and_then(PageAction::from_click) {
                Some(action) => controller.dispatch(action).await,
                None => eprintln!("{element} is not a button"),
            }
        }
        Command::Providers => {
            for option in controller.provider_options() {
                println!("{:<16} {}", option.name, option.description);
            }
        }
        Command::Show => {}
        Command::Quit => return false,
    }
    true
}

enum Input {
    Line(std::io::Result<Option<String>>),
    Event(ProviderEvent),
    Shutdown,
}

/// Drive the controller from prompt lines and provider events until the
/// input ends, `quit` is typed or shutdown fires. The wallet is always
/// disconnected on the way out.
pub async fn run<R>(
    controller: &mut PageController<MemoryPage>,
    input: R,
    mut shutdown_rx: broadcast::Receiver<()>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    render(controller);

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line),
            event = controller.next_event() => Input::Event(event),
            _ = shutdown_rx.recv() => Input::Shutdown,
        };

        match input {
            Input::Line(Ok(None)) | Input::Shutdown => break,
            Input::Line(Err(e)) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
            Input::Line(Ok(Some(line))) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_line(&line) {
                    Ok(command) => {
                        if !run_command(controller, command).await {
                            break;
                        }
                    }
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                }
            }
            Input::Event(event) => {
                if let Err(e) = controller.handle_event(event).await {
                    tracing::warn!(error = %e, "Refresh after provider event failed");
                }
            }
        }

        render(controller);
    }

    controller.disconnect().await;
}

/// Print the page and any alerts raised since the last render.
pub fn render(controller: &mut PageController<MemoryPage>) {
    for alert in controller.page_mut().take_alerts() {
        println!("! {alert}");
    }
    print!("{}", controller.page().render());
}
