use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("sectio")
        .version("0.1.0")
        .about("Extract the main text of HTML documents")
        .arg(clap::arg!(<INPUT> "Local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--exclude <TAG> "Tag kind to strip before analysis (repeatable)").value_name("TAG"))
        .arg(clap::arg!(--paragraph_tag <TAG> "Tag kind that forms sections (repeatable)").value_name("TAG"))
        .arg(clap::arg!(--recover_tag <TAG> "Extra tag kind recovered into sections (repeatable)").value_name("TAG"))
        .arg(clap::arg!(--separator <SEP> "Title separator (repeatable)").value_name("SEP"))
        .arg(clap::arg!(--base_url <URL> "Base URL for resolving image sources").value_name("URL"))
        .arg(clap::arg!(--sections <NUM> "Ranked sections to summarize, 0 for all").default_value("5"))
        .arg(clap::arg!(--no_reconcile "Skip recovery of missed elements into sections"))
        .arg(clap::arg!(--groups "Print sibling element groups, largest first"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "sectio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "sectio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "sectio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "sectio", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
