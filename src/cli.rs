use std::io::{self, Write};

use vecsim::similarity::similarity;
use vecsim::store::{Document, DocumentStore, IndexSettings, Upsert, VectorSearch};
use vecsim::vector::{analogy, cosine_similarity};

pub enum Command {
    Insert { id: String, vec: Vec<f32> },
    Search { vec: Vec<f32>, k_top: usize },
    Get { id: String },
    List,
    Count,
    Delete { id: String },
    Sim { a: String, b: String },
    Rank { id: String },
    Analogy { a: String, b: String, c: String, k_top: usize },
}

/// Parse a command from a provided argument vector
/// args[0] is the program name, args[1] the command
pub fn parse_command_from_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command provided. Use: insert, search, get, list, count, delete, sim, rank, analogy".to_string());
    }

    let command = &args[1];

    match command.as_str() {
        "insert" => parse_insert(args),
        "search" => parse_search(args),
        "get" => parse_get(args),
        "list" => parse_no_args(args, Command::List),
        "count" => parse_no_args(args, Command::Count),
        "delete" => parse_delete(args),
        "sim" => parse_sim(args),
        "rank" => parse_rank(args),
        "analogy" => parse_analogy(args),
        _ => Err(format!("Unknown command: {}. Available: insert, search, get, list, count, delete, sim, rank, analogy", command)),
    }
}

fn parse_vector(parts: &[String]) -> Result<Vec<f32>, String> {
    parts.iter()
        .map(|s| s.parse::<f32>())
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|_| "Failed to parse vector components as numbers".to_string())
}

/// Splits an optional trailing `--k_top <number>` off the arguments.
/// Returns the end of the remaining arguments and the k value (default 5).
fn split_k_top(args: &[String]) -> Result<(usize, usize), String> {
    if args.len() >= 4 && args[args.len() - 2] == "--k_top" {
        return match args[args.len() - 1].parse::<usize>() {
            Ok(k) if k > 0 => Ok((args.len() - 2, k)),
            _ => Err(format!("Invalid --k_top value: '{}'. Must be a positive integer.", args[args.len() - 1])),
        };
    }
    Ok((args.len(), 5))
}

/// Usage: insert <id> <v1> <v2> ...
fn parse_insert(args: &[String]) -> Result<Command, String> {
    if args.len() < 4 {
        return Err("'insert' command requires an ID and a vector. Usage: insert <id> <v1> <v2> ...".to_string());
    }

    let id = args[2].clone();
    let vec = parse_vector(&args[3..])?;
    Ok(Command::Insert { id, vec })
}

/// Usage: search <v1> <v2> ... [--k_top <number>]
fn parse_search(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'search' command requires at least one vector component. Usage: search <v1> <v2> ... [--k_top <number>]".to_string());
    }

    let (vector_end, k_top) = split_k_top(args)?;
    let vec = parse_vector(&args[2..vector_end])?;
    if vec.is_empty() {
        return Err("Search vector cannot be empty".to_string());
    }

    Ok(Command::Search { vec, k_top })
}

/// Usage: get <id>
fn parse_get(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'get' command requires an ID. Usage: get <id>".to_string());
    }
    Ok(Command::Get { id: args[2].clone() })
}

/// Usage: delete <id>
fn parse_delete(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'delete' command requires an ID. Usage: delete <id>".to_string());
    }
    Ok(Command::Delete { id: args[2].clone() })
}

fn parse_no_args(args: &[String], command: Command) -> Result<Command, String> {
    if args.len() > 2 {
        eprintln!("Warning: '{}' command takes no arguments, ignoring extras", args[1]);
    }
    Ok(command)
}

/// Usage: sim <id1> <id2>
fn parse_sim(args: &[String]) -> Result<Command, String> {
    if args.len() < 4 {
        return Err("'sim' command requires two IDs. Usage: sim <id1> <id2>".to_string());
    }
    Ok(Command::Sim { a: args[2].clone(), b: args[3].clone() })
}

/// Usage: rank <id>
fn parse_rank(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'rank' command requires an ID. Usage: rank <id>".to_string());
    }
    Ok(Command::Rank { id: args[2].clone() })
}

/// Usage: analogy <a> <b> <c> [--k_top <number>]
fn parse_analogy(args: &[String]) -> Result<Command, String> {
    let (end, k_top) = split_k_top(args)?;
    if end != 5 {
        return Err("'analogy' command requires three IDs. Usage: analogy <a> <b> <c> [--k_top <number>]".to_string());
    }

    Ok(Command::Analogy {
        a: args[2].clone(),
        b: args[3].clone(),
        c: args[4].clone(),
        k_top,
    })
}

/// Named vectors for one REPL session. The store is created on the first
/// insert and takes its dimension from that vector.
#[derive(Default)]
pub struct Session {
    store: Option<DocumentStore>,
}

impl Session {
    fn vector(&self, id: &str) -> Result<&[f32], String> {
        self.store.as_ref()
            .and_then(|store| store.get(id))
            .map(|doc| doc.embedding.as_slice())
            .ok_or_else(|| format!("Vector '{}' not found", id))
    }

    fn search(&self, vec: &[f32], k_top: usize) {
        let Some(store) = &self.store else {
            println!("No results found");
            return;
        };

        match store.vector_search(vec, VectorSearch { num_candidates: k_top, limit: k_top }) {
            Ok(results) if results.is_empty() => println!("No results found"),
            Ok(results) => {
                println!("Top {} results:", results.len());
                for (rank, result) in results.iter().enumerate() {
                    println!("{}. ID: {}, Score: {:.4}, Vector: {:?}",
                        rank + 1, result.id, result.score, result.embedding);
                }
            }
            Err(error) => eprintln!("Error: {}", error),
        }
    }
}

/// REPL mode - interactive session over in-memory named vectors
pub fn run_repl(session: &mut Session) -> io::Result<()> {
    println!("vecsim - Vector Similarity");
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("vecsim> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_help();
            continue;
        }

        let mut args: Vec<String> = vec!["vecsim".to_string()];
        args.extend(input.split_whitespace().map(|s| s.to_string()));

        let command = match parse_command_from_args(&args) {
            Ok(cmd) => cmd,
            Err(error) => {
                eprintln!("Error: {}", error);
                continue;
            }
        };

        execute_command(session, command);
    }

    Ok(())
}

pub fn execute_command(session: &mut Session, command: Command) {
    match command {
        Command::Insert { id, vec } => {
            let store = session.store
                .get_or_insert_with(|| DocumentStore::new(IndexSettings::cosine(vec.len())));
            match store.insert(Document::new(id.clone(), "", vec)) {
                Ok(Upsert::Inserted) => println!("Inserted vector '{}'", id),
                Ok(Upsert::Updated) => println!("Updated vector '{}'", id),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Search { vec, k_top } => session.search(&vec, k_top),

        Command::Get { id } => {
            match session.vector(&id) {
                Ok(vector) => println!("Vector '{}': {:?}", id, vector),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::List => {
            match &session.store {
                Some(store) if store.count() > 0 => {
                    println!("Stored vectors:");
                    for doc in store.list() {
                        println!("  {}: {:?}", doc.id, doc.embedding);
                    }
                    println!("Total: {} vectors", store.count());
                }
                _ => println!("Session is empty"),
            }
        }

        Command::Count => println!("{}", session.store.as_ref().map_or(0, |s| s.count())),

        Command::Delete { id } => {
            let result = match session.store.as_mut() {
                Some(store) => store.delete(&id).map_err(|e| e.to_string()),
                None => Err("Cannot delete on empty session".to_string()),
            };
            match result {
                Ok(()) => println!("Deleted vector '{}'", id),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Sim { a, b } => {
            match (session.vector(&a), session.vector(&b)) {
                (Ok(x), Ok(y)) => {
                    let sim = cosine_similarity(x, y);
                    println!("{} -> {}: {:.3}% similar", a, b, sim * 100.0);
                }
                (Err(error), _) | (_, Err(error)) => eprintln!("Error: {}", error),
            }
        }

        Command::Rank { id } => {
            let Some(store) = &session.store else {
                eprintln!("Error: Vector '{}' not found", id);
                return;
            };
            let Some(target) = store.get(&id) else {
                eprintln!("Error: Vector '{}' not found", id);
                return;
            };

            for result in similarity(target, store.list()) {
                println!("{} -> {}: {:.3}% similar", result.target.id, result.candidate.id, result.percentage);
            }
        }

        Command::Analogy { a, b, c, k_top } => {
            let vectors = (session.vector(&a), session.vector(&b), session.vector(&c));
            match vectors {
                (Ok(x), Ok(y), Ok(z)) => {
                    let composed = analogy(x, y, z);
                    println!("{} - {} + {} = {:?}", a, b, c, composed);
                    session.search(&composed, k_top);
                }
                (Err(error), _, _) | (_, Err(error), _) | (_, _, Err(error)) => eprintln!("Error: {}", error),
            }
        }
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  insert <id> <v1> <v2> ...          - Insert or replace a named vector");
    println!("  search <v1> <v2> ... [--k_top N]   - Find the nearest vectors (default k=5)");
    println!("  get <id>                           - Show a vector");
    println!("  list                               - List all vectors");
    println!("  count                              - Show vector count");
    println!("  delete <id>                        - Delete a vector");
    println!("  sim <id1> <id2>                    - Cosine similarity of two vectors");
    println!("  rank <id>                          - Similarity of one vector to every vector");
    println!("  analogy <a> <b> <c> [--k_top N]    - Search for a - b + c");
    println!("  help                               - Show this help");
    println!("  exit, quit                         - Exit the program");
}

#[cfg(test)]
mod cli_test {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("vecsim").chain(line.split_whitespace()).map(String::from).collect()
    }

    #[test]
    fn test_parse_insert() {
        match parse_command_from_args(&args("insert king 1 0 1 1 -1")) {
            Ok(Command::Insert { id, vec }) => {
                assert_eq!(id, "king");
                assert_eq!(vec, vec![1.0, 0.0, 1.0, 1.0, -1.0]);
            }
            _ => panic!("expected insert"),
        }
        assert!(parse_command_from_args(&args("insert king")).is_err());
        assert!(parse_command_from_args(&args("insert king one")).is_err());
    }

    #[test]
    fn test_parse_search_k_top() {
        match parse_command_from_args(&args("search 1 0 --k_top 3")) {
            Ok(Command::Search { vec, k_top }) => {
                assert_eq!(vec, vec![1.0, 0.0]);
                assert_eq!(k_top, 3);
            }
            _ => panic!("expected search"),
        }
        match parse_command_from_args(&args("search 1 0")) {
            Ok(Command::Search { k_top, .. }) => assert_eq!(k_top, 5),
            _ => panic!("expected search"),
        }
        assert!(parse_command_from_args(&args("search 1 --k_top 0")).is_err());
        assert!(parse_command_from_args(&args("search --k_top 3")).is_err());
    }

    #[test]
    fn test_parse_analogy() {
        match parse_command_from_args(&args("analogy king man woman --k_top 1")) {
            Ok(Command::Analogy { a, b, c, k_top }) => {
                assert_eq!((a.as_str(), b.as_str(), c.as_str()), ("king", "man", "woman"));
                assert_eq!(k_top, 1);
            }
            _ => panic!("expected analogy"),
        }
        assert!(parse_command_from_args(&args("analogy king man")).is_err());
        assert!(parse_command_from_args(&args("analogy a b c d")).is_err());
    }

    #[test]
    fn test_parse_unknown_and_missing() {
        assert!(parse_command_from_args(&args("")).is_err());
        assert!(parse_command_from_args(&args("frobnicate")).is_err());
        assert!(parse_command_from_args(&args("sim king")).is_err());
        assert!(matches!(parse_command_from_args(&args("count")), Ok(Command::Count)));
    }

    #[test]
    fn test_session_insert_and_lookup() {
        let mut session = Session::default();
        execute_command(&mut session, Command::Insert { id: "a".to_string(), vec: vec![1.0, 2.0] });
        execute_command(&mut session, Command::Insert { id: "b".to_string(), vec: vec![1.0, 2.0, 3.0] });

        assert_eq!(session.vector("a").unwrap(), &[1.0, 2.0]);
        // dimension fixed by the first insert
        assert!(session.vector("b").is_err());

        execute_command(&mut session, Command::Delete { id: "a".to_string() });
        assert!(session.vector("a").is_err());
    }
}
