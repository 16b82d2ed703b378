use std::time::Duration;

use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
  #[arg(
    short,
    long,
    value_name = "FLOAT",
    help = "Tick rate, i.e. number of ticks per second",
    default_value_t = 4.0,
    value_parser = parse_rate
  )]
  pub tick_rate: f64,

  #[arg(
    short,
    long,
    value_name = "FLOAT",
    help = "Frame rate, i.e. number of frames per second",
    default_value_t = 30.0,
    value_parser = parse_rate
  )]
  pub frame_rate: f64,

  #[arg(long, value_name = "URL", help = "Address polled by the list mounted at `react`")]
  pub react_address: Option<String>,

  #[arg(long, value_name = "URL", help = "Address polled by the list mounted at `targets`")]
  pub targets_address: Option<String>,
}

fn parse_rate(value: &str) -> Result<f64, String> {
  let rate: f64 = value.parse().map_err(|_| format!("`{value}` is not a number"))?;
  if rate.is_finite() && rate > 0.0 && Duration::try_from_secs_f64(1.0 / rate).is_ok() {
    Ok(rate)
  } else {
    Err(format!("`{value}` is not a usable rate, expected a number greater than zero"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let cli = Cli::parse_from(["pollboard"]);

    assert_eq!(cli.tick_rate, 4.0);
    assert_eq!(cli.frame_rate, 30.0);
    assert_eq!(cli.react_address, None);
  }

  #[test]
  fn test_address_overrides() {
    let cli = Cli::parse_from(["pollboard", "--targets-address", "http://localhost:9000/api/targets/"]);

    assert_eq!(cli.targets_address.as_deref(), Some("http://localhost:9000/api/targets/"));
    assert_eq!(cli.react_address, None);
  }

  #[test]
  fn test_rejects_rates_that_are_not_positive() {
    assert!(Cli::try_parse_from(["pollboard", "--tick-rate", "0"]).is_err());
    assert!(Cli::try_parse_from(["pollboard", "--frame-rate=-5"]).is_err());
    assert!(Cli::try_parse_from(["pollboard", "--frame-rate", "inf"]).is_err());
    assert!(Cli::try_parse_from(["pollboard", "--tick-rate", "1e-300"]).is_err());
    assert!(Cli::try_parse_from(["pollboard", "--tick-rate", "fast"]).is_err());
  }

  #[test]
  fn test_accepts_fractional_rates() {
    let cli = Cli::parse_from(["pollboard", "--tick-rate", "0.5"]);

    assert_eq!(cli.tick_rate, 0.5);
  }
}
