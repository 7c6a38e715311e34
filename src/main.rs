use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::env;
use taiwan_locale::{
    format_date_range, format_file_size, format_invoice_amount, format_roc_date,
    format_taiwan_phone, format_twd, parse_chinese_number, parse_taiwan_date,
    parse_taiwan_phone, parse_twd, to_chinese_numeral, to_chinese_numerals, LocaleConfig,
};
use tracing::info;

const USAGE: &str = "usage: twfmt <command> <args...>

commands:
  twd <amount> [--compact]   format an NT dollar amount
  parse-twd <text>           parse NT dollar text
  words <amount>             formal numerals (壹貳參)
  invoice <subtotal>         subtotal / tax / total
  phone <text>               classify + format a phone number
  numeral <n>                0-9999 to Chinese numerals
  parse-number <text>        Chinese numeral text to a number
  roc <YYYY-MM-DD>           民國 date
  parse-date <text>          parse a Taiwan date
  filesize <bytes>           human file size
  range <start> <end>        collapsed date range (YYYY-MM-DD)";

fn main() -> Result<()> {
    let config = load_config()?;
    tracing_subscriber::fmt()
        .with_max_level(log_level(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    info!(command = %command, "running twfmt command");
    let output = run(command, &args[1..], &config)?;
    println!("{}", output);

    Ok(())
}

fn load_config() -> Result<LocaleConfig> {
    match env::var("TWFMT_CONFIG") {
        Ok(path) => LocaleConfig::from_file(&path)
            .with_context(|| format!("Failed to load TWFMT_CONFIG={}", path)),
        Err(_) => Ok(LocaleConfig::default()),
    }
}

fn log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::WARN,
    }
}

fn run(command: &str, args: &[String], config: &LocaleConfig) -> Result<String> {
    match command {
        "twd" => {
            let amount = number_arg(args, 0)?;
            let mut options = config.currency;
            if args.iter().any(|a| a == "--compact") {
                options.compact = true;
            }
            Ok(format_twd(amount, options))
        }
        "parse-twd" => {
            let text = text_arg(args, 0)?;
            parse_twd(text)
                .map(|v| v.to_string())
                .ok_or_else(|| anyhow!("Not an NT dollar amount: {}", text))
        }
        "words" => Ok(to_chinese_numerals(number_arg(args, 0)?)?),
        "invoice" => {
            let invoice = format_invoice_amount(number_arg(args, 0)?, config.invoice_tax_rate);
            Ok(format!(
                "小計 {}\n稅額 {}\n總計 {}",
                invoice.formatted_subtotal, invoice.formatted_tax, invoice.formatted_total
            ))
        }
        "phone" => {
            let text = text_arg(args, 0)?;
            match parse_taiwan_phone(text) {
                Some(parsed) => Ok(serde_json::to_string_pretty(&parsed)?),
                None => Ok(format_taiwan_phone(text, false)),
            }
        }
        "numeral" => {
            let n: i64 = text_arg(args, 0)?
                .parse()
                .context("numeral expects an integer")?;
            Ok(to_chinese_numeral(n)?)
        }
        "parse-number" => {
            let text = text_arg(args, 0)?;
            parse_chinese_number(text)
                .map(|v| v.to_string())
                .ok_or_else(|| anyhow!("Not a number: {}", text))
        }
        "roc" => Ok(format_roc_date(iso_date_arg(args, 0)?)),
        "parse-date" => {
            let text = text_arg(args, 0)?;
            parse_taiwan_date(text)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .ok_or_else(|| anyhow!("Not a Taiwan date: {}", text))
        }
        "filesize" => {
            let bytes: u64 = text_arg(args, 0)?
                .parse()
                .context("filesize expects a byte count")?;
            Ok(format_file_size(bytes))
        }
        "range" => Ok(format_date_range(
            iso_date_arg(args, 0)?,
            iso_date_arg(args, 1)?,
        )),
        other => Err(anyhow!("Unknown command: {}\n\n{}", other, USAGE)),
    }
}

fn text_arg(args: &[String], index: usize) -> Result<&str> {
    args.get(index)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("Missing argument #{}\n\n{}", index + 1, USAGE))
}

fn number_arg(args: &[String], index: usize) -> Result<f64> {
    let text = text_arg(args, index)?;
    text.parse()
        .with_context(|| format!("Expected a number, got: {}", text))
}

fn iso_date_arg(args: &[String], index: usize) -> Result<NaiveDate> {
    let text = text_arg(args, index)?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("Expected YYYY-MM-DD, got: {}", text))
}
