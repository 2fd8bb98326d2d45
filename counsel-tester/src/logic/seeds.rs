use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("invalid seed '{0}': expected an unsigned integer or 0x-prefixed hex")]
    Invalid(String),
    #[error("no seeds given")]
    Empty,
}

fn parse_seed(token: &str) -> Result<u64, SeedError> {
    let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => token.parse::<u64>(),
    };
    parsed.map_err(|_| SeedError::Invalid(token.to_string()))
}

/// Resolve CLI seed tokens into unique seeds, keeping their order.
///
/// # Errors
///
/// Fails on the first token that is not a seed, or when nothing remains.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>, SeedError> {
    let mut seeds = Vec::new();
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        let seed = parse_seed(token)?;
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        return Err(SeedError::Empty);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn decimal_and_hex_seeds_dedupe() {
        let seeds = resolve_seed_inputs(&tokens(&["1337", "0x539", "42"])).unwrap();
        assert_eq!(seeds, vec![1337, 42]);
    }

    #[test]
    fn bad_tokens_are_rejected() {
        assert_eq!(
            resolve_seed_inputs(&tokens(&["12", "twelve"])),
            Err(SeedError::Invalid("twelve".into()))
        );
        assert_eq!(resolve_seed_inputs(&[]), Err(SeedError::Empty));
    }
}
