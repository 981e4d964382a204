//! UCL command-line tool.

use ucl::commands::{check_file, lex_file, parse_file, Options};

fn main() {
    ucl::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "parse" | "check" => {
            if args.len() < 3 {
                eprintln!("Usage: ucl {command} <file> [options]");
                std::process::exit(1);
            }
            let options = match Options::parse(&args[3..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("{msg}");
                    std::process::exit(1);
                }
            };
            if command == "parse" {
                parse_file(&args[2], &options)
            } else {
                check_file(&args[2], &options)
            }
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: ucl lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("ucl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(report) => {
            eprint!("{report}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("UCL configuration tool");
    println!();
    println!("Usage: ucl <command> [options]");
    println!();
    println!("Commands:");
    println!("  parse <file>         Parse a file and print the document");
    println!("  check <file>         Parse a file and report errors only");
    println!("  lex <file>           Tokenize and display raw tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Parse/check options:");
    println!("  --format=<fmt>       Output: json (default), compact, config, yaml");
    println!("  --allow-macro=<name> Accept `.name <arg>` directives without checking them");
    println!("  --lowercase          Lowercase every key");
    println!("  --no-time            Keep time suffixes (10s, 5min) as strings");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=ucl_parse=debug) to trace parsing.");
    println!();
    println!("Examples:");
    println!("  ucl parse app.conf");
    println!("  ucl parse app.conf --format=yaml");
    println!("  ucl check app.conf --allow-macro=include");
}
