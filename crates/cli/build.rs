use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("vestio")
        .version("1.0.0")
        .author("Vestio Contributors")
        .about("ETL pipeline for fashion-catalog products")
        .arg(clap::arg!(--pages <NUM> "Number of listing pages to scrape").default_value("50"))
        .arg(clap::arg!(--delay <SECS> "Delay between page requests, in seconds").default_value("0.5"))
        .arg(
            clap::arg!(-o --output <FILE> "Output CSV path")
                .default_value("products.csv")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"no-csv" "Skip the CSV sink"))
        .arg(clap::arg!(--"base-url" <URL> "Catalog root URL").value_name("URL"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds, per attempt").default_value("10"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(
            clap::arg!(--"exchange-rate" <RATE> "Source-currency to target-currency conversion rate")
                .default_value("16000"),
        )
        .arg(clap::arg!(--"sheet-id" <ID> "Target spreadsheet key").value_name("ID"))
        .arg(clap::arg!(--worksheet <NAME> "Worksheet receiving the rows").default_value("products"))
        .arg(clap::arg!(--"database-url" <URL> "Postgres connection string").value_name("URL"))
        .arg(clap::arg!(--table <NAME> "Postgres table receiving the rows").default_value("products"))
        .arg(clap::arg!(-v --verbose "Enable verbose progress output"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "vestio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "vestio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "vestio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "vestio", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
