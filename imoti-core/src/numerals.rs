//! Bulgarian numeral spelling in Latin transliteration.
//!
//! Decomposes a non-negative integer into magnitude-grouped word tokens
//! (billions, millions, thousands, then the 0-999 remainder) and joins them
//! into the spelled form, e.g. `3435` → `"tri hilyadi chetiristotin trideset
//! i pet"`. The conjunction `i` appears between a tens word and a directly
//! following units word only, matching the source convention.

/// Magnitude class of one decomposed word piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Units,
    Tens,
    Hundreds,
    Thousand,
    Million,
    Billion,
}

/// One spelled word piece tagged with its magnitude class.
///
/// The tag drives join formatting: `join_tokens` inserts the conjunction
/// between a `Tens` token and an immediately following `Units` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumeralToken {
    pub word: &'static str,
    pub magnitude: Magnitude,
}

/// Error for numbers beyond the defined magnitude tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumeralError {
    /// Magnitude classes are defined up to billions; 10^12 and above are
    /// out of range and callers fall back to the digit form.
    OutOfRange(u64),
}

impl std::fmt::Display for NumeralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumeralError::OutOfRange(n) => {
                write!(f, "number {} exceeds the spellable range", n)
            }
        }
    }
}

impl std::error::Error for NumeralError {}

/// Largest value `decompose` accepts.
pub const MAX_SPELLABLE: u64 = 999_999_999_999;

const ONES: [&str; 20] = [
    "nula",
    "edno",
    "dve",
    "tri",
    "chetiri",
    "pet",
    "shest",
    "sedem",
    "osem",
    "devet",
    "deset",
    "edinadeset",
    "dvanadeset",
    "trinadeset",
    "chetirinadeset",
    "petnadeset",
    "shestnadeset",
    "sedemnadeset",
    "osemnadeset",
    "devetnadeset",
];

const TENS: [&str; 10] = [
    "",
    "",
    "dvadeset",
    "trideset",
    "chetirideset",
    "petdeset",
    "shestdeset",
    "sedemdeset",
    "osemdeset",
    "devetdeset",
];

// Irregular stems per hundreds digit, not a regular "<digit> hundred" pattern.
const HUNDREDS: [&str; 10] = [
    "",
    "sto",
    "dvesta",
    "trista",
    "chetiristotin",
    "petstotin",
    "sheststotin",
    "sedemstotin",
    "osemstotin",
    "devetstotin",
];

/// Conjunction inserted between a tens word and a following units word.
pub const CONJUNCTION: &str = "i";

/// Decompose a 1-999 group into hundreds/tens/units tokens.
fn push_group(n: u64, tokens: &mut Vec<NumeralToken>) {
    debug_assert!((1..=999).contains(&n));

    let hundreds = (n / 100) as usize;
    if hundreds > 0 {
        tokens.push(NumeralToken {
            word: HUNDREDS[hundreds],
            magnitude: Magnitude::Hundreds,
        });
    }

    let rest = n % 100;
    if rest >= 20 {
        tokens.push(NumeralToken {
            word: TENS[(rest / 10) as usize],
            magnitude: Magnitude::Tens,
        });
        let units = (rest % 10) as usize;
        if units > 0 {
            tokens.push(NumeralToken {
                word: ONES[units],
                magnitude: Magnitude::Units,
            });
        }
    } else if rest > 0 {
        // 1-19 are single table words, teens included
        tokens.push(NumeralToken {
            word: ONES[rest as usize],
            magnitude: Magnitude::Units,
        });
    }
}

/// Decompose `n` into its ordered word tokens.
///
/// A group quotient of exactly 1 takes the irregular single form
/// (`hilyada`, `edin milion`, `edin miliard`); larger quotients are spelled
/// as a 0-999 group followed by the plural group word (`hilyadi`,
/// `miliona`, `miliarda`).
///
/// # Example
///
/// ```
/// use imoti_core::numerals::decompose;
///
/// let tokens = decompose(21).unwrap();
/// let words: Vec<&str> = tokens.iter().map(|t| t.word).collect();
/// assert_eq!(words, vec!["dvadeset", "edno"]);
/// ```
pub fn decompose(n: u64) -> Result<Vec<NumeralToken>, NumeralError> {
    if n > MAX_SPELLABLE {
        return Err(NumeralError::OutOfRange(n));
    }
    if n == 0 {
        return Ok(vec![NumeralToken {
            word: ONES[0],
            magnitude: Magnitude::Units,
        }]);
    }

    let mut tokens = Vec::new();
    let mut rest = n;

    let billions = rest / 1_000_000_000;
    rest %= 1_000_000_000;
    match billions {
        0 => {}
        1 => {
            tokens.push(NumeralToken {
                word: "edin",
                magnitude: Magnitude::Units,
            });
            tokens.push(NumeralToken {
                word: "miliard",
                magnitude: Magnitude::Billion,
            });
        }
        _ => {
            push_group(billions, &mut tokens);
            tokens.push(NumeralToken {
                word: "miliarda",
                magnitude: Magnitude::Billion,
            });
        }
    }

    let millions = rest / 1_000_000;
    rest %= 1_000_000;
    match millions {
        0 => {}
        1 => {
            tokens.push(NumeralToken {
                word: "edin",
                magnitude: Magnitude::Units,
            });
            tokens.push(NumeralToken {
                word: "milion",
                magnitude: Magnitude::Million,
            });
        }
        _ => {
            push_group(millions, &mut tokens);
            tokens.push(NumeralToken {
                word: "miliona",
                magnitude: Magnitude::Million,
            });
        }
    }

    let thousands = rest / 1_000;
    rest %= 1_000;
    match thousands {
        0 => {}
        // "hilyada" stands alone, never "edno hilyada"
        1 => tokens.push(NumeralToken {
            word: "hilyada",
            magnitude: Magnitude::Thousand,
        }),
        _ => {
            push_group(thousands, &mut tokens);
            tokens.push(NumeralToken {
                word: "hilyadi",
                magnitude: Magnitude::Thousand,
            });
        }
    }

    if rest > 0 {
        push_group(rest, &mut tokens);
    }

    Ok(tokens)
}

/// Join decomposed tokens with spaces, inserting the conjunction between a
/// tens token and a directly following units token.
pub fn join_tokens(tokens: &[NumeralToken]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            if token.magnitude == Magnitude::Units && tokens[i - 1].magnitude == Magnitude::Tens {
                out.push(' ');
                out.push_str(CONJUNCTION);
            }
            out.push(' ');
        }
        out.push_str(token.word);
    }
    out
}

/// Spell `n` in full: decompose and join.
///
/// # Example
///
/// ```
/// use imoti_core::numerals::spell;
///
/// assert_eq!(
///     spell(3435).unwrap(),
///     "tri hilyadi chetiristotin trideset i pet"
/// );
/// ```
pub fn spell(n: u64) -> Result<String, NumeralError> {
    Ok(join_tokens(&decompose(n)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Re-parse spelled words back to the number they came from. Test
    /// oracle only; accepts exactly the output vocabulary of `spell`.
    fn words_to_number(text: &str) -> u64 {
        fn word_value(word: &str) -> u64 {
            if let Some(i) = ONES.iter().position(|&w| w == word) {
                return i as u64;
            }
            if let Some(i) = TENS.iter().position(|&w| !w.is_empty() && w == word) {
                return (i * 10) as u64;
            }
            if let Some(i) = HUNDREDS.iter().position(|&w| !w.is_empty() && w == word) {
                return (i * 100) as u64;
            }
            panic!("unknown numeral word: {word}");
        }

        let mut total = 0u64;
        let mut group = 0u64;
        for word in text.split_whitespace() {
            match word {
                "i" => {}
                "edin" => group = 1,
                "hilyada" => total += 1_000,
                "hilyadi" => {
                    total += group * 1_000;
                    group = 0;
                }
                "milion" | "miliona" => {
                    total += group * 1_000_000;
                    group = 0;
                }
                "miliard" | "miliarda" => {
                    total += group * 1_000_000_000;
                    group = 0;
                }
                other => group += word_value(other),
            }
        }
        total + group
    }

    // ========== Small Numbers ==========

    #[test]
    fn test_zero() {
        assert_eq!(spell(0).unwrap(), "nula");
    }

    #[test]
    fn test_units_and_teens() {
        assert_eq!(spell(1).unwrap(), "edno");
        assert_eq!(spell(2).unwrap(), "dve");
        assert_eq!(spell(5).unwrap(), "pet");
        assert_eq!(spell(10).unwrap(), "deset");
        assert_eq!(spell(11).unwrap(), "edinadeset");
        assert_eq!(spell(14).unwrap(), "chetirinadeset");
        assert_eq!(spell(19).unwrap(), "devetnadeset");
    }

    #[test]
    fn test_tens_without_units_have_no_conjunction() {
        assert_eq!(spell(20).unwrap(), "dvadeset");
        assert_eq!(spell(30).unwrap(), "trideset");
        assert_eq!(spell(90).unwrap(), "devetdeset");
    }

    #[test]
    fn test_tens_with_units_take_conjunction() {
        assert_eq!(spell(21).unwrap(), "dvadeset i edno");
        assert_eq!(spell(42).unwrap(), "chetirideset i dve");
        assert_eq!(spell(99).unwrap(), "devetdeset i devet");
    }

    // ========== Hundreds ==========

    #[test]
    fn test_hundreds_irregular_stems() {
        assert_eq!(spell(100).unwrap(), "sto");
        assert_eq!(spell(200).unwrap(), "dvesta");
        assert_eq!(spell(300).unwrap(), "trista");
        assert_eq!(spell(400).unwrap(), "chetiristotin");
        assert_eq!(spell(900).unwrap(), "devetstotin");
    }

    #[test]
    fn test_hundred_plus_unit_has_no_conjunction() {
        // Tens group is zero, so no conjunction before the unit
        assert_eq!(spell(101).unwrap(), "sto edno");
        assert_eq!(spell(111).unwrap(), "sto edinadeset");
        assert_eq!(spell(121).unwrap(), "sto dvadeset i edno");
    }

    // ========== Thousands ==========

    #[test]
    fn test_one_thousand_is_irregular() {
        assert_eq!(spell(1000).unwrap(), "hilyada");
        assert_eq!(spell(1001).unwrap(), "hilyada edno");
    }

    #[test]
    fn test_plural_thousands() {
        assert_eq!(spell(2000).unwrap(), "dve hilyadi");
        assert_eq!(
            spell(3435).unwrap(),
            "tri hilyadi chetiristotin trideset i pet"
        );
        assert_eq!(
            spell(824_545).unwrap(),
            "osemstotin dvadeset i chetiri hilyadi petstotin chetirideset i pet"
        );
    }

    // ========== Millions and Billions ==========

    #[test]
    fn test_millions() {
        assert_eq!(spell(1_000_000).unwrap(), "edin milion");
        assert_eq!(spell(2_000_000).unwrap(), "dve miliona");
        assert_eq!(
            spell(2_500_000).unwrap(),
            "dve miliona petstotin hilyadi"
        );
    }

    #[test]
    fn test_billions() {
        assert_eq!(spell(1_000_000_000).unwrap(), "edin miliard");
        assert_eq!(spell(3_000_000_000).unwrap(), "tri miliarda");
        assert_eq!(
            spell(1_002_003_004).unwrap(),
            "edin miliard dve miliona tri hilyadi chetiri"
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(spell(MAX_SPELLABLE + 1), Err(NumeralError::OutOfRange(MAX_SPELLABLE + 1)));
        assert!(spell(MAX_SPELLABLE).is_ok());
        assert_eq!(spell(u64::MAX), Err(NumeralError::OutOfRange(u64::MAX)));
    }

    // ========== Token Structure ==========

    #[test]
    fn test_zero_is_a_single_units_token() {
        let tokens = decompose(0).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "nula");
        assert_eq!(tokens[0].magnitude, Magnitude::Units);
    }

    #[test]
    fn test_magnitude_tags() {
        let magnitudes: Vec<Magnitude> = decompose(21)
            .unwrap()
            .iter()
            .map(|t| t.magnitude)
            .collect();
        assert_eq!(magnitudes, vec![Magnitude::Tens, Magnitude::Units]);

        let magnitudes: Vec<Magnitude> = decompose(100)
            .unwrap()
            .iter()
            .map(|t| t.magnitude)
            .collect();
        assert_eq!(magnitudes, vec![Magnitude::Hundreds]);

        let magnitudes: Vec<Magnitude> = decompose(3435)
            .unwrap()
            .iter()
            .map(|t| t.magnitude)
            .collect();
        assert_eq!(
            magnitudes,
            vec![
                Magnitude::Units,
                Magnitude::Thousand,
                Magnitude::Hundreds,
                Magnitude::Tens,
                Magnitude::Units,
            ]
        );
    }

    #[test]
    fn test_conjunction_only_between_tens_and_units() {
        // "edin milion" must not become "edin i milion", and the group
        // word after a units token takes a plain space
        assert!(!spell(1_000_000).unwrap().contains(" i "));
        assert!(!spell(2_000).unwrap().contains(" i "));
        assert_eq!(spell(1_021_000).unwrap(), "edin milion dvadeset i edno hilyadi");
    }

    // ========== Round Trip ==========

    #[test]
    fn test_round_trip_exhaustive_small_range() {
        for n in 0..=2_000u64 {
            let spelled = spell(n).unwrap();
            assert_eq!(words_to_number(&spelled), n, "failed for {n}: {spelled}");
        }
    }

    #[test]
    fn test_round_trip_magnitude_boundaries() {
        let boundaries = [
            19u64,
            20,
            99,
            100,
            101,
            999,
            1_000,
            1_001,
            19_999,
            20_000,
            999_999,
            1_000_000,
            1_000_001,
            999_999_999,
            1_000_000_000,
            1_000_000_001,
            MAX_SPELLABLE,
        ];
        for &n in &boundaries {
            let spelled = spell(n).unwrap();
            assert_eq!(words_to_number(&spelled), n, "failed for {n}: {spelled}");
        }
    }

    #[test]
    fn test_round_trip_strided_sweep() {
        // Prime stride so every magnitude group sees varied digits
        for n in (0..1_000_000_000u64).step_by(7_919_741) {
            let spelled = spell(n).unwrap();
            assert_eq!(words_to_number(&spelled), n, "failed for {n}: {spelled}");
        }
    }

    #[test]
    fn test_sample_listing_amounts() {
        assert_eq!(
            spell(824_545).unwrap(),
            "osemstotin dvadeset i chetiri hilyadi petstotin chetirideset i pet"
        );
        assert_eq!(spell(270_000).unwrap(), "dvesta sedemdeset hilyadi");
        assert_eq!(spell(240).unwrap(), "dvesta chetirideset");
        assert_eq!(
            spell(2_294).unwrap(),
            "dve hilyadi dvesta devetdeset i chetiri"
        );
    }
}
