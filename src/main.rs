use jiggler::commands::Cli;
use jiggler::libs::logging;
use jiggler::libs::messages::Message;
use jiggler::msg_error;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = Cli::menu().await {
        msg_error!(Message::CommandFailed(e.to_string()));
        std::process::exit(1);
    }
}
