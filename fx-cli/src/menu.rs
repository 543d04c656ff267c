//! Interactive menu loop.
//!
//! Reads choices and amounts line by line, calls the conversion service and
//! prints results. Service errors are printed and the loop carries on; only
//! end of input or an IO failure stops it early.

use std::io::{self, BufRead, Write};

use fx_hex::ConversionService;
use fx_types::{
    ApiKeyProvider, ConversionError, ConversionRequest, CurrencyCode, CurrencyCodeSource,
    CurrencyPair, LookupError, RateSource,
};
use tracing::warn;

const CODES_PER_ROW: usize = 12;

/// Why a prompt sequence stopped before finishing.
enum Stop {
    Eof,
    Io(io::Error),
}

impl From<io::Error> for Stop {
    fn from(err: io::Error) -> Self {
        Stop::Io(err)
    }
}

enum Choice {
    Pair(usize),
    Custom,
    Refresh,
    Exit,
}

pub struct Menu<'s, K, R, C, I, O> {
    service: &'s ConversionService<K, R, C>,
    pairs: Vec<CurrencyPair>,
    input: I,
    output: O,
}

impl<'s, K, R, C, I, O> Menu<'s, K, R, C, I, O>
where
    K: ApiKeyProvider,
    R: RateSource,
    C: CurrencyCodeSource,
    I: BufRead,
    O: Write,
{
    pub fn new(
        service: &'s ConversionService<K, R, C>,
        pairs: Vec<CurrencyPair>,
        input: I,
        output: O,
    ) -> Self {
        Self {
            service,
            pairs,
            input,
            output,
        }
    }

    /// Runs until the user exits, declines another conversion, or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the currency converter!")?;

        match self.session().await {
            Ok(()) | Err(Stop::Eof) => {}
            Err(Stop::Io(err)) => return Err(err),
        }

        writeln!(self.output, "Goodbye, thanks for using the converter!")?;
        self.output.flush()
    }

    async fn session(&mut self) -> Result<(), Stop> {
        loop {
            match self.read_choice()? {
                Choice::Exit => return Ok(()),
                Choice::Refresh => {
                    self.refresh().await?;
                    continue;
                }
                Choice::Pair(index) => {
                    let pair = self.pairs[index].clone();
                    self.convert(pair.from, pair.to).await?;
                }
                Choice::Custom => self.custom().await?,
            }

            let answer = self.prompt("\nDo you want to make another conversion? (y/n): ")?;
            if !matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "si") {
                return Ok(());
            }
        }
    }

    fn read_choice(&mut self) -> Result<Choice, Stop> {
        let custom = self.pairs.len() + 1;
        let refresh = custom + 1;
        let exit = refresh + 1;

        loop {
            writeln!(self.output, "Select an option:")?;
            for (i, pair) in self.pairs.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, pair.label)?;
            }
            writeln!(self.output, "{}. Custom pair", custom)?;
            writeln!(self.output, "{}. Refresh currency list", refresh)?;
            writeln!(self.output, "{}. Exit", exit)?;

            let answer = self.prompt("Option: ")?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=self.pairs.len()).contains(&n) => return Ok(Choice::Pair(n - 1)),
                Ok(n) if n == custom => return Ok(Choice::Custom),
                Ok(n) if n == refresh => return Ok(Choice::Refresh),
                Ok(n) if n == exit => return Ok(Choice::Exit),
                _ => writeln!(
                    self.output,
                    "Invalid option, please choose one of the listed numbers."
                )?,
            }
        }
    }

    async fn convert(&mut self, from: CurrencyCode, to: CurrencyCode) -> Result<(), Stop> {
        let amount = self.read_amount(&format!("Amount to convert from {} to {}: ", from, to))?;
        let request = ConversionRequest::new(from, to, amount);

        match self.service.convert(&request).await {
            Ok(conversion) => writeln!(self.output, "{}", conversion)?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    async fn custom(&mut self) -> Result<(), Stop> {
        let supported = match self.service.supported_currencies().await {
            Ok(codes) => codes,
            Err(err) => return self.report(&err),
        };

        writeln!(self.output, "Available currencies:")?;
        let codes: Vec<&str> = supported.iter().map(CurrencyCode::as_str).collect();
        for row in codes.chunks(CODES_PER_ROW) {
            writeln!(self.output, "  {}", row.join(" "))?;
        }

        let hint = if self.service.has_country_lookup() {
            " (code or country name)"
        } else {
            ""
        };
        let Some(from) = self.read_currency(&format!("Source currency{}: ", hint)).await? else {
            return Ok(());
        };
        let Some(to) = self.read_currency(&format!("Target currency{}: ", hint)).await? else {
            return Ok(());
        };

        self.convert(from, to).await
    }

    async fn refresh(&mut self) -> Result<(), Stop> {
        self.service.currency_cache().invalidate().await;
        match self.service.supported_currencies().await {
            Ok(codes) => writeln!(
                self.output,
                "Currency list refreshed: {} currencies available.",
                codes.len()
            )?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    /// Re-prompts until the input resolves; `None` when the service itself failed.
    async fn read_currency(&mut self, prompt: &str) -> Result<Option<CurrencyCode>, Stop> {
        loop {
            let input = self.prompt(prompt)?;
            match self.service.resolve_currency(&input).await {
                Ok(code) => return Ok(Some(code)),
                Err(err) if is_input_error(&err) => {
                    writeln!(self.output, "{}. Please try again.", err)?;
                }
                Err(err) => {
                    self.report(&err)?;
                    return Ok(None);
                }
            }
        }
    }

    fn read_amount(&mut self, prompt: &str) -> Result<f64, Stop> {
        loop {
            let input = self.prompt(prompt)?;
            match input.parse::<f64>() {
                Ok(amount) => return Ok(amount),
                Err(_) => writeln!(self.output, "Please enter a numeric amount.")?,
            }
        }
    }

    /// Prints `prompt` and returns the trimmed next line.
    fn prompt(&mut self, prompt: &str) -> Result<String, Stop> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(Stop::Eof);
        }
        Ok(line.trim().to_string())
    }

    fn report(&mut self, err: &ConversionError) -> Result<(), Stop> {
        warn!(error = %err, "Request failed");
        writeln!(self.output, "Error: {}", err)?;
        Ok(())
    }
}

/// Errors caused by what the user typed, as opposed to config or network.
fn is_input_error(err: &ConversionError) -> bool {
    matches!(
        err,
        ConversionError::UnknownCurrency(_)
            | ConversionError::Domain(_)
            | ConversionError::Lookup(LookupError::NotFound(_) | LookupError::UnexpectedShape)
    )
}
