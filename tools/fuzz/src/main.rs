use afl::fuzz;
use codice_fiscale::{
    compute_check_char, normalize_input, validate, CheckKind, Diagnostic, MunicipalityDataset,
    FISCAL_CODE_LENGTH,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    let i = input.iter().position(|b| *b == b',')?;
    Some((&input[0..i], &input[i + 1..]))
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (input, rand_seed) = split_bytes_once(bytes)?;
    let input_str = std::str::from_utf8(input).ok()?;

    let mut rng_seed: u64 = 0;
    for byte in rand_seed.iter().take(8) {
        rng_seed <<= 8;
        rng_seed += *byte as u64;
    }

    let rng = StdRng::seed_from_u64(rng_seed);
    run_fuzz(&normalize_input(input_str), rng);

    Some(())
}

fn gen_catastral_code(rng: &mut StdRng) -> String {
    let first = rng.gen_range(b'A'..=b'Z') as char;
    format!("{first}{:03}", rng.gen_range(0..1000))
}

fn run_fuzz(code: &str, mut rng: StdRng) {
    let dataset = MunicipalityDataset::from_entries(
        (0..rng.gen_range(0..8)).map(|i| (gen_catastral_code(&mut rng), format!("Comune {i}"))),
    );

    #[cfg(feature = "manual_test")]
    {
        println!("Code: {:?}", code);
        println!("Dataset: {:?}", dataset);
    }

    let result = validate(code, &dataset);

    #[cfg(feature = "manual_test")]
    {
        println!("Result: {:?}", result);
    }

    if code.chars().count() != FISCAL_CODE_LENGTH {
        assert!(!result.valid);
        assert_eq!(result.diagnostics.len(), 1);
        return;
    }

    let checks: Vec<CheckKind> = result.diagnostics.iter().map(Diagnostic::check).collect();
    assert_eq!(
        checks,
        vec![
            CheckKind::Format,
            CheckKind::Month,
            CheckKind::Day,
            CheckKind::Municipality,
            CheckKind::Checksum
        ]
    );
    assert_eq!(result.valid, result.failures().next().is_none());

    // a valid code always carries the expected check character
    if result.valid {
        let prefix: String = code.chars().take(FISCAL_CODE_LENGTH - 1).collect();
        assert_eq!(compute_check_char(&prefix), code.chars().last());
    }
}
