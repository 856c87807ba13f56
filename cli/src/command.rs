//! Parsing of the commands typed at the catalog prompt.

use std::str::FromStr;

use catalog_core::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Reload,
    Name(String),
    Category(String),
    Price(f64),
    Submit,
    Edit(ProductId),
    Cancel,
    Delete(ProductId),
    MostExpensive,
    Cheapest,
    Average,
    AboveAverage,
    BelowAverage,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("comando vazio")]
    Empty,
    #[error("comando desconhecido: {0}")]
    Unknown(String),
    #[error("`{0}` precisa de um argumento")]
    MissingArgument(&'static str),
    #[error("número inválido: {0}")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
Comandos:
  reload              recarrega a lista completa
  name <texto>        define o nome no formulário
  category <texto>    define a categoria no formulário
  price <valor>       define o preço no formulário (aceita 25.90 ou 25,90)
  submit              cria o produto ou salva a edição
  edit <id>           carrega um produto da lista no formulário
  cancel              descarta a edição em andamento
  delete <id>         apaga um produto (pede confirmação)
  max | min           produto mais caro / mais barato
  avg                 preço médio
  above | below       lista apenas produtos acima / abaixo da média
  show                mostra a tela novamente
  help                esta ajuda
  quit                sai";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        match keyword.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "reload" | "list" => Ok(Command::Reload),
            "name" => Ok(Command::Name(text("name", rest)?)),
            "category" => Ok(Command::Category(text("category", rest)?)),
            "price" => Ok(Command::Price(price(rest)?)),
            "submit" | "save" => Ok(Command::Submit),
            "edit" => Ok(Command::Edit(id("edit", rest)?)),
            "cancel" => Ok(Command::Cancel),
            "delete" | "rm" => Ok(Command::Delete(id("delete", rest)?)),
            "max" => Ok(Command::MostExpensive),
            "min" => Ok(Command::Cheapest),
            "avg" => Ok(Command::Average),
            "above" => Ok(Command::AboveAverage),
            "below" => Ok(Command::BelowAverage),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }
}

fn text(command: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(rest.to_string())
}

fn id(command: &'static str, rest: &str) -> Result<ProductId, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    rest.parse()
        .map_err(|_| CommandError::InvalidNumber(rest.to_string()))
}

/// Accepts a comma as decimal separator. Non-finite values are rejected.
fn price(rest: &str) -> Result<f64, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument("price"));
    }
    match rest.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidNumber(rest.to_string())),
    }
}
