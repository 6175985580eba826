use anyhow::{anyhow, Context, Result};

pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let mut seeds = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        seeds.push(parse_seed(token)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

/// `count` consecutive seeds from `start`, wrapping at `u32::MAX`.
pub fn seed_range(start: u32, count: u32) -> Result<Vec<u32>> {
    if count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }
    Ok((0..count).map(|offset| start.wrapping_add(offset)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_parse_as_decimal_or_hex() -> Result<()> {
        assert_eq!(parse_seed("42")?, 42);
        assert_eq!(parse_seed(" 0xDEADBEEF ")?, 0xDEAD_BEEF);
        assert_eq!(parse_seed("0X10")?, 16);
        assert!(parse_seed("").is_err());
        assert!(parse_seed("0xZZ").is_err());
        assert!(parse_seed("-1").is_err());
        Ok(())
    }

    #[test]
    fn csv_skips_blank_tokens() -> Result<()> {
        assert_eq!(parse_seed_csv("1, ,0x2,")?, vec![1, 2]);
        assert!(parse_seed_csv(" , ").is_err());
        Ok(())
    }

    #[test]
    fn range_wraps_around() -> Result<()> {
        assert_eq!(seed_range(u32::MAX, 2)?, vec![u32::MAX, 0]);
        assert!(seed_range(5, 0).is_err());
        assert_eq!(seed_to_hex(0xAB), "0x000000ab");
        Ok(())
    }
}
