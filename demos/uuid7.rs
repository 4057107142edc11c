//! Simple command that prints one or '-n count' UUIDv7 strings, or converts between UUIDs and
//! MongoDB ObjectIds with '-l objectid' and '-u uuid'

use std::{env, io, io::Write, process::ExitCode};

use uuid7_oid::Uuid;

enum Command {
    Generate(usize),
    FromLegacy(String),
    ToLegacy(String),
}

fn main() -> io::Result<ExitCode> {
    let mut args = env::args();
    let program = args.next();
    let command = match parse_args(args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!(
                "Usage: {} [-n count | -l objectid | -u uuid]",
                program.as_deref().unwrap_or("uuid7")
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    match command {
        Command::Generate(count) => {
            for _ in 0..count {
                let uuid = Uuid::generate().map_err(io::Error::other)?;
                writeln!(buf, "{}", uuid)?;
            }
        }
        Command::FromLegacy(src) => match Uuid::from_legacy_id(&src) {
            Ok(uuid) => writeln!(buf, "{}", uuid)?,
            Err(err) => {
                eprintln!("Error: '{}': {}", src, err);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::ToLegacy(src) => match Uuid::parse_str(&src) {
            Ok(uuid) => writeln!(buf, "{}", uuid.to_legacy_id())?,
            Err(err) => {
                eprintln!("Error: '{}': {}", src, err);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut command = None;
    while let Some(arg) = args.next() {
        if command.is_some() {
            return Err("only one option may be given".to_owned());
        }
        let opt = match arg.as_str() {
            "-n" | "-l" | "-u" => arg,
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", &opt[1..]));
        };
        command = Some(match opt.as_str() {
            "-n" => {
                let Ok(c) = value.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", value));
                };
                Command::Generate(c)
            }
            "-l" => Command::FromLegacy(value),
            _ => Command::ToLegacy(value),
        });
    }
    Ok(command.unwrap_or(Command::Generate(1)))
}
