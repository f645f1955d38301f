use std::io::{self, BufRead};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use sable::engine::{Engine, MAX_DEPTH};
use sable::moves::perft::perft_divide;
use sable::moves::tables::attack_tables;

const DEFAULT_TT_MB: usize = 128;
const DEFAULT_BOOK: &str = "book.bin";

fn main() -> ExitCode {
    sable::logger::init("sable=info");

    let book_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_BOOK.into());
    let mut engine = Engine::new(DEFAULT_TT_MB, Some(Path::new(&book_path)));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => return ExitCode::FAILURE,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };

        match command {
            "uci" => {
                println!("id name Sable 0.4");
                println!("id author Sable contributors");
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => {
                let _ = engine.set_position("startpos", &[]);
            }
            "position" => handle_position(&mut engine, &parts),
            "go" => handle_go(&mut engine, &parts),
            "stop" => engine.stop(),
            "d" | "display" => println!("{}", engine.board()),
            "fen" => println!("{}", engine.board().to_fen()),
            "perft" => handle_perft(&mut engine, &parts),
            "quit" | "exit" => break,
            _ => {}
        }
    }

    ExitCode::SUCCESS
}

fn handle_position(engine: &mut Engine, parts: &[&str]) {
    let moves_at = parts.iter().position(|&p| p == "moves");
    let moves: Vec<&str> = match moves_at {
        Some(i) => parts[i + 1..].to_vec(),
        None => Vec::new(),
    };

    let result = match parts.get(1) {
        Some(&"startpos") => engine.set_position("startpos", &moves),
        Some(&"fen") => {
            let fen_end = moves_at.unwrap_or(parts.len());
            let fen = parts[2..fen_end].join(" ");
            engine.set_position(&fen, &moves)
        }
        _ => {
            eprintln!("invalid position command");
            return;
        }
    };
    if let Err(err) = result {
        eprintln!("{}", err);
    }
}

fn handle_go(engine: &mut Engine, parts: &[&str]) {
    let mut depth: Option<u8> = None;
    let mut movetime: Option<u64> = None;

    let mut iter = parts[1..].iter();
    while let Some(&token) = iter.next() {
        match token {
            "depth" => depth = iter.next().and_then(|v| v.parse().ok()),
            "movetime" => movetime = iter.next().and_then(|v| v.parse().ok()),
            _ => {}
        }
    }

    // Depth-limited requests get effectively unbounded time and vice versa.
    let movetime = movetime.or(if depth.is_some() { Some(600_000) } else { None });
    let depth = depth.unwrap_or(MAX_DEPTH);

    match engine.go(Some(depth), movetime) {
        Some(mv) => println!("bestmove {}", mv.to_uci()),
        None => println!("bestmove 0000"),
    }
}

fn handle_perft(engine: &mut Engine, parts: &[&str]) {
    let depth: u32 = parts.get(1).and_then(|v| v.parse().ok()).unwrap_or(1);
    let start = Instant::now();
    let results = perft_divide(engine.board_mut(), attack_tables(), depth);
    let total: u64 = results.iter().map(|(_, n)| n).sum();
    for (mv, nodes) in &results {
        println!("{}: {}", mv.to_uci(), nodes);
    }
    println!("nodes {} time {} ms", total, start.elapsed().as_millis());
}
