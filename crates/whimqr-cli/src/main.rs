use std::env;
use std::error::Error;
use std::fs;
use std::process::ExitCode;

use whimqr::{diff, encode, mix, EcLevel, Mask, QrError, Symbol, Version};
use whimqr_png::{blend, rasterize, scale, stamp, to_png_bytes, TilePattern};

// Both products build version 4 symbols at the highest correction level
// with a fixed mask.
const VERSION: u8 = 4;
const MASK: u8 = 0;

// Pixels per module in the output images.
const BOX_SIZE: u32 = 20;

// Correction codewords kept in reserve per randomized block; the pasted
// texture spends them.
const INSERTION: usize = 1;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("qash") if args.len() == 2 => qash(&args[1]),
        Some("whim") if args.len() == 3 => {
            let data: Vec<char> = args[1].chars().collect();
            match args[2].parse::<usize>() {
                Ok(index) if index < data.len() => whim(&data, index),
                _ => return usage(),
            }
        }
        _ => return usage(),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("whimqr: {err}");
            ExitCode::FAILURE
        }
    }
}

fn usage() -> ExitCode {
    eprintln!("usage: whimqr qash <data>");
    eprintln!("       whimqr whim <data> <index>");
    ExitCode::from(2)
}

fn encode_default(payload: &[u8]) -> Result<Symbol, QrError> {
    encode(
        payload,
        Version::new(VERSION),
        EcLevel::High,
        Mask::new(MASK),
    )
}

// Scrambles every block up to its correction budget minus the reserve, then
// pastes a camouflage speckle over the first stampable light module.
fn qash(data: &str) -> Result<(), Box<dyn Error>> {
    let symbol = encode_default(data.as_bytes())?;
    let capacity = symbol.correction_capacity()?;
    let blocks = symbol.block_count()?;

    let mut rng = rand::rng();
    let mut scrambled = symbol;
    for index in 0..blocks {
        scrambled = scrambled.with_randomized_block(index, capacity - INSERTION + 1, &mut rng)?;
    }

    let mut img = scale(&rasterize(&scrambled, "#888888")?, BOX_SIZE);
    if let Some((x, y)) = first_light_module(&scrambled) {
        let tile = TilePattern::speckle().tile(BOX_SIZE, BOX_SIZE);
        stamp(&mut img, &tile, x * BOX_SIZE, y * BOX_SIZE);
    }

    fs::write("qash.png", to_png_bytes(&img)?)?;
    println!("qash.png");
    Ok(())
}

// Substitutes every alphabet character at `index`, keeps the candidates
// whose codeword streams sit exactly 2t+1 away, and writes one blended
// image per mixable candidate.
fn whim(data: &[char], index: usize) -> Result<(), Box<dyn Error>> {
    let original: String = data.iter().collect();
    let symbol = encode_default(original.as_bytes())?;
    let capacity = symbol.correction_capacity()?;

    let mut hits = 0usize;
    for substitute in ALPHABET.chars() {
        if data[index] == substitute {
            continue;
        }
        let mut candidate: Vec<char> = data.to_vec();
        candidate[index] = substitute;
        let candidate: String = candidate.into_iter().collect();

        let other = encode_default(candidate.as_bytes())?;
        if diff(&symbol.interleaved, &other.interleaved) != 2 * capacity + 1 {
            continue;
        }
        let mixed = match mix(&symbol.interleaved, &other.interleaved, capacity) {
            Ok(mixed) => mixed,
            Err(QrError::NoMixablePivot) => continue,
            Err(err) => return Err(err.into()),
        };

        let left = symbol.with_codeword_stream(&mixed.left)?;
        let right = symbol.with_codeword_stream(&mixed.right)?;
        let img = scale(
            &blend(&rasterize(&left, "#000000")?, &rasterize(&right, "#000000")?)?,
            BOX_SIZE,
        );

        let name = format!("whim-{}.png", sanitize(&candidate));
        fs::write(&name, to_png_bytes(&img)?)?;
        println!("{candidate} -> {name}");
        hits += 1;
    }
    if hits == 0 {
        println!("no mixable candidates");
    }
    Ok(())
}

// First light module past the top-left finder block, in scan order.
fn first_light_module(symbol: &Symbol) -> Option<(u32, u32)> {
    for y in 0..symbol.size {
        for x in 0..symbol.size {
            if x > 9 && y > 9 && !symbol.get_module(x, y) {
                return Some((x as u32, y as u32));
            }
        }
    }
    None
}

// Keeps filenames safe for payloads like URLs.
fn sanitize(candidate: &str) -> String {
    candidate
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
