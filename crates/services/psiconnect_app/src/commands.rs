// --- File: crates/services/psiconnect_app/src/commands.rs ---
//! Line-oriented commands understood by the terminal driver.

use chrono::NaiveDate;
use psiconnect_checkout::{CardDetails, PaymentMethod};
use psiconnect_common::{validation_error, PsiError};
use psiconnect_sessions::{DocumentType, SessionFilter};
use psiconnect_slots::logic::{parse_date, parse_time_of_day};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Slots,
    Next,
    Prev,
    Toggle { date: NaiveDate, time: String },
    Remove { date: NaiveDate, time: String },
    Cart,
    Schedule,
    Confirm,
    Accept,
    Reject,
    Pay { method: PaymentMethod, card: Option<CardDetails> },
    Receipt,
    Home,
    Sessions(SessionFilter),
    Details(u32),
    Reschedule { id: u32, date: NaiveDate, time: String },
    Cancel(u32),
    Eligible(DocumentType),
    Issue {
        document: DocumentType,
        email: String,
        confirm_email: String,
        ids: Vec<u32>,
    },
    Back,
    Logout,
    Help,
    Quit,
}

pub const HELP: &str = "\
Comandos:
  login <email> <senha>
  slots | next | prev
  toggle <AAAA-MM-DD> <HH:MM> | remove <AAAA-MM-DD> <HH:MM> | cart
  schedule | confirm | accept | reject
  pay pix | pay card <número> <validade> <cvv> <nome...>
  receipt | home
  sessions [all|upcoming|completed|cancelled]
  details <id> | reschedule <id> <AAAA-MM-DD> <HH:MM> | cancel <id>
  eligible <invoice|frequency>
  issue <invoice|frequency> <email> <confirmação> <id,id...>
  back | logout | help | quit";

fn arg<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str, PsiError> {
    args.get(index)
        .copied()
        .ok_or_else(|| validation_error(format!("Uso: {}", usage)))
}

fn id_arg(args: &[&str], index: usize, usage: &str) -> Result<u32, PsiError> {
    let raw = arg(args, index, usage)?;
    raw.parse::<u32>()
        .map_err(|_| validation_error(format!("Id de sessão inválido: {}", raw)))
}

fn slot_args(args: &[&str], usage: &str) -> Result<(NaiveDate, String), PsiError> {
    let date = parse_date(arg(args, 0, usage)?)?;
    let time = arg(args, 1, usage)?;
    parse_time_of_day(time)?;
    Ok((date, time.to_string()))
}

fn id_list(raw: &str) -> Result<Vec<u32>, PsiError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| validation_error(format!("Id de sessão inválido: {}", part)))
        })
        .collect()
}

impl FromStr for Command {
    type Err = PsiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| validation_error("Digite um comando"))?
            .to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "login" => Command::Login {
                email: arg(&args, 0, "login <email> <senha>")?.to_string(),
                password: arg(&args, 1, "login <email> <senha>")?.to_string(),
            },
            "slots" => Command::Slots,
            "next" => Command::Next,
            "prev" => Command::Prev,
            "toggle" => {
                let (date, time) = slot_args(&args, "toggle <AAAA-MM-DD> <HH:MM>")?;
                Command::Toggle { date, time }
            }
            "remove" => {
                let (date, time) = slot_args(&args, "remove <AAAA-MM-DD> <HH:MM>")?;
                Command::Remove { date, time }
            }
            "cart" => Command::Cart,
            "schedule" => Command::Schedule,
            "confirm" => Command::Confirm,
            "accept" => Command::Accept,
            "reject" => Command::Reject,
            "pay" => {
                let usage = "pay pix | pay card <número> <validade> <cvv> <nome...>";
                let method = PaymentMethod::from_str(arg(&args, 0, usage)?)?;
                let card = match method {
                    PaymentMethod::Pix => None,
                    PaymentMethod::Card => {
                        let number = arg(&args, 1, usage)?;
                        let expiry = arg(&args, 2, usage)?;
                        let cvv = arg(&args, 3, usage)?;
                        let name = args.get(4..).unwrap_or_default().join(" ");
                        Some(CardDetails::new(number, &name, expiry, cvv))
                    }
                };
                Command::Pay { method, card }
            }
            "receipt" => Command::Receipt,
            "home" => Command::Home,
            "sessions" => Command::Sessions(SessionFilter::from_str(
                args.first().copied().unwrap_or(""),
            )?),
            "details" => Command::Details(id_arg(&args, 0, "details <id>")?),
            "reschedule" => {
                let usage = "reschedule <id> <AAAA-MM-DD> <HH:MM>";
                let id = id_arg(&args, 0, usage)?;
                let (date, time) = slot_args(args.get(1..).unwrap_or_default(), usage)?;
                Command::Reschedule { id, date, time }
            }
            "cancel" => Command::Cancel(id_arg(&args, 0, "cancel <id>")?),
            "eligible" => Command::Eligible(DocumentType::from_str(arg(
                &args,
                0,
                "eligible <invoice|frequency>",
            )?)?),
            "issue" => {
                let usage = "issue <invoice|frequency> <email> <confirmação> <id,id...>";
                Command::Issue {
                    document: DocumentType::from_str(arg(&args, 0, usage)?)?,
                    email: arg(&args, 1, usage)?.to_string(),
                    confirm_email: arg(&args, 2, usage)?.to_string(),
                    ids: id_list(args.get(3).copied().unwrap_or(""))?,
                }
            }
            "back" => Command::Back,
            "logout" => Command::Logout,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(validation_error(format!("Comando desconhecido: {}", other))),
        };
        Ok(command)
    }
}
