use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <program_file> [<spec_file>]", args[0]);
        std::process::exit(1)
    }

    let path = &args[1];
    let input_data = read_json(path);
    let spec_data = match args.get(2) {
        Some(spec_path) => read_json(spec_path),
        None => serde_json::json!({}),
    };
    println!("\n---------- RUN: {} ----------", path);

    let (output, room_table) = internal::run(input_data, spec_data);

    // output paths with sub-directory creation
    let output_dir_name = "output";
    let output_path = ensure_output_path(path, output_dir_name);
    let file = File::create(&output_path).expect("Error creating file");
    serde_json::to_writer_pretty(file, &output).expect("Error writing JSON");

    let table_path = format!("{}.csv", output_path.trim_end_matches(".json"));
    fs::write(table_path, room_table).expect("Error writing room table");

    std::process::exit(0)
}

fn read_json(path: &str) -> serde_json::Value {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            println!("Error: {}", error);
            std::process::exit(1)
        }
    };
    let mut data = String::new();
    if let Err(error) = file.read_to_string(&mut data) {
        println!("Error reading {}: {}", path, error);
        std::process::exit(1)
    }
    match serde_json::from_str(&data) {
        Ok(json) => json,
        Err(error) => {
            println!("Error parsing {}: {}", path, error);
            std::process::exit(1)
        }
    }
}

fn ensure_output_path(input_path: &str, output_dir_name: &str) -> String {
    let file_name = Path::new(input_path)
        .file_name()
        .expect("Error getting file name")
        .to_str()
        .expect("Error converting file name to string");
    let output_path = format!("{}/output_{}", output_dir_name, file_name);
    if let Some(parent_dir) = Path::new(&output_path).parent() {
        fs::create_dir_all(parent_dir).expect("Error creating directories");
    }
    output_path
}
