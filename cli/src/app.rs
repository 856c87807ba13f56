use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use catalog_core::config::DEFAULT_BASE_URL;
use catalog_core::{CatalogApi, CatalogController, ClientConfig, Transport};
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::info;

use crate::command::{Command, HELP};
use crate::prompt::LineConfirm;
use crate::view;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Gestão de produtos pelo terminal")]
pub struct Args {
    /// Base address of the catalog backend.
    #[arg(long, env = "CATALOG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Give up on a request after this many seconds. Waits forever when unset.
    #[arg(long, env = "CATALOG_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.base_url.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let config = self.client_config();
        let api = CatalogApi::from_config(&config).context("failed to build the HTTP client")?;
        info!(base_url = %config.base_url, "catalog front-end starting");

        let mut controller = CatalogController::new(api);
        controller.load_all().await;
        println!("{}", view::render(&controller));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        session(&mut controller, &mut lines).await
    }
}

/// Read commands until `quit` or end of input, re-rendering after each one.
pub async fn session<T, R>(controller: &mut CatalogController<T>, lines: &mut Lines<R>) -> anyhow::Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin + Send,
{
    loop {
        print!("> ");
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            return Ok(());
        };
        match line.parse::<Command>() {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Help) => println!("{HELP}"),
            Ok(command) => {
                if let Some(note) = dispatch(controller, command, lines).await {
                    println!("{note}");
                }
                println!("{}", view::render(controller));
            }
            Err(err) => println!("{err} (digite `help`)"),
        }
    }
}

/// Apply one command. Returns a note for the user when the command could
/// not be applied at all.
pub async fn dispatch<T, R>(
    controller: &mut CatalogController<T>,
    command: Command,
    lines: &mut Lines<R>,
) -> Option<String>
where
    T: Transport,
    R: AsyncBufRead + Unpin + Send,
{
    match command {
        Command::Reload => controller.load_all().await,
        Command::Name(name) => controller.form_mut().name = name,
        Command::Category(category) => controller.form_mut().category = category,
        Command::Price(price) => controller.form_mut().price = price,
        Command::Submit => controller.submit_form().await,
        Command::Edit(id) => {
            if !controller.select_for_edit(id) {
                return Some(format!("Produto {id} não está na lista."));
            }
        }
        Command::Cancel => controller.cancel_edit(),
        Command::Delete(id) => controller.remove(id, &mut LineConfirm::new(lines)).await,
        Command::MostExpensive => controller.most_expensive().await,
        Command::Cheapest => controller.cheapest().await,
        Command::Average => controller.average().await,
        Command::AboveAverage => controller.above_average().await,
        Command::BelowAverage => controller.below_average().await,
        Command::Show | Command::Help | Command::Quit => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use catalog_core::{Mode, ReqwestTransport};
    use clap::CommandFactory;

    use super::*;

    async fn controller() -> CatalogController<ReqwestTransport> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(mock_server::run(listener));
        let api = CatalogApi::from_config(&ClientConfig::new(format!("http://{addr}"))).unwrap();
        CatalogController::new(api)
    }

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn timeout_flag_reaches_the_config() {
        let args = Args::parse_from(["catalog", "--base-url", "http://api:9000", "--timeout-secs", "5"]);
        let config = args.client_config();
        assert_eq!(config.base_url, "http://api:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scripted_session_creates_edits_and_deletes() {
        let mut c = controller().await;
        let script: &[u8] = b"name Caneca\n\
            category Casa\n\
            price 25,0\n\
            submit\n\
            edit 1\n\
            price 30\n\
            submit\n\
            delete 1\n\
            n\n";
        let mut lines = script.lines();
        session(&mut c, &mut lines).await.unwrap();

        assert_eq!(c.products().len(), 1);
        assert_eq!(c.products()[0].price, 30.0);
        assert_eq!(c.status(), "Produto 1 atualizado com sucesso!");
        assert_eq!(c.mode(), Mode::Create);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn confirmed_delete_reads_the_next_line() {
        let mut c = controller().await;
        let script = "name Lápis\ncategory Escritório\nprice 1.5\nsubmit\ndelete 1\nsim\nquit\nreload\n".as_bytes();
        let mut lines = script.lines();
        session(&mut c, &mut lines).await.unwrap();

        assert!(c.products().is_empty());
        assert_eq!(c.status(), "Produto com 1 apagado com sucesso!");
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("reload"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn edit_of_unlisted_id_returns_a_note() {
        let mut c = controller().await;
        let mut lines = (b"" as &[u8]).lines();
        let note = dispatch(&mut c, Command::Edit(7), &mut lines).await;
        assert_eq!(note.as_deref(), Some("Produto 7 não está na lista."));
        assert_eq!(c.mode(), Mode::Create);
    }
}
