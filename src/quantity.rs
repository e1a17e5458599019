use std::num::ParseFloatError;

/// Binary memory suffixes and their multiplier in bytes
const MEMORY_UNITS: [(&str, f64); 4] = [
  ("Ki", 1024.0),
  ("Mi", 1024.0 * 1024.0),
  ("Gi", 1024.0 * 1024.0 * 1024.0),
  ("Ti", 1024.0 * 1024.0 * 1024.0 * 1024.0),
];

/// Decimal CPU suffixes and the divisor that converts them to whole cores
const CPU_UNITS: [(&str, f64); 3] = [("n", 1_000_000_000.0), ("u", 1_000_000.0), ("m", 1_000.0)];

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// A quantity reported by the API server that could not be interpreted
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum QuantityError {
  #[error("invalid CPU quantity `{raw}`")]
  Cpu {
    raw: String,
    #[source]
    source: NumberError,
  },

  #[error("invalid memory quantity `{raw}`")]
  Memory {
    raw: String,
    #[source]
    source: NumberError,
  },
}

/// Why the numeric part of a quantity was rejected
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum NumberError {
  #[error(transparent)]
  Parse(#[from] ParseFloatError),

  #[error("value is not finite")]
  NonFinite,
}

/// Parses the numeric part of a quantity, rejecting `inf` and `NaN`
fn parse_number(value: &str) -> Result<f64, NumberError> {
  let number = value.parse::<f64>()?;
  if !number.is_finite() {
    return Err(NumberError::NonFinite);
  }

  Ok(number)
}

/// Converts a CPU quantity such as `100m`, `250000u` or `0.5` into cores
///
/// An absent or empty quantity is `0.0`
pub fn parse_cpu(raw: Option<&str>) -> Result<f64, QuantityError> {
  let raw = match raw {
    Some(raw) if !raw.is_empty() => raw,
    _ => return Ok(0.0),
  };

  let invalid = |source| QuantityError::Cpu {
    raw: raw.to_owned(),
    source,
  };

  for (suffix, divisor) in CPU_UNITS {
    if let Some(value) = raw.strip_suffix(suffix) {
      return parse_number(value).map(|v| v / divisor).map_err(invalid);
    }
  }

  parse_number(raw).map_err(invalid)
}

/// Converts a memory quantity such as `1024Ki`, `50Mi` or a plain byte count into MiB
///
/// An absent or empty quantity is `0.0`
pub fn parse_memory(raw: Option<&str>) -> Result<f64, QuantityError> {
  let raw = match raw {
    Some(raw) if !raw.is_empty() => raw,
    _ => return Ok(0.0),
  };

  let invalid = |source| QuantityError::Memory {
    raw: raw.to_owned(),
    source,
  };

  for (suffix, multiplier) in MEMORY_UNITS {
    if let Some(value) = raw.strip_suffix(suffix) {
      let bytes = parse_number(value).map_err(invalid)? * multiplier;
      return Ok(bytes / BYTES_PER_MIB);
    }
  }

  let bytes = parse_number(raw).map_err(invalid)?;
  Ok(bytes / BYTES_PER_MIB)
}
