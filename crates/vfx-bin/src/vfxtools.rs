use clap::Parser;
use vfx::{DocumentKind, Macros};

mod common;
use common::*;

fn main() {
    if let Err(err) = Cli::parse().run() {
        if !err.is_empty() {
            eprintln!("{err}");
        }
        std::process::exit(1);
    }
}

/// Tools for working with VFX test-description files.
#[derive(Debug, Parser)]
#[command(
    name = "vfxtools",
    version = "0.1",
    about,
    long_about,
    max_term_width(100)
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Define a macro that is substituted in every line before parsing.
    ///
    /// The definition has the form NAME=VALUE.
    /// If the value is omitted the macro is defined as 1.
    #[arg(short = 'D', long = "define", global = true)]
    defines: Vec<MacroDefinition>,
}

impl Cli {
    fn run(self) -> Result<(), String> {
        let mut macros = Macros::new();
        for definition in &self.defines {
            macros.define(&definition.name, &definition.value);
        }
        match self.command {
            Command::Check(check) => check.run(&macros),
            Command::Print(print) => print.run(&macros),
            Command::Enums(enums) => enums.run(),
        }
    }
}

#[derive(Clone, Debug, clap::Subcommand)]
enum Command {
    /// Check that a .vfx or .pipe file is valid.
    ///
    /// All errors are printed.
    /// Shaders are not compiled by a real compiler;
    ///     the check only verifies that every shader section has some source.
    Check(Check),

    /// Parse a .vfx or .pipe file and print it back out.
    ///
    /// By default the document is printed in the VFX format,
    ///     with only the members that differ from their default values.
    /// With --json the typed state of the document is printed as JSON.
    Print(Print),

    /// List the enum names that can be used as values.
    ///
    /// For example, to list all primitive topologies:
    ///
    ///   $ vfxtools enums VK_PRIMITIVE_TOPOLOGY_
    Enums(Enums),
}

#[derive(Clone, Debug, Parser)]
struct Check {
    /// Path to the .vfx or .pipe file to validate.
    path: VfxPath,
}

impl Check {
    fn run(&self, macros: &Macros) -> Result<(), String> {
        let document = self.path.read(macros)?;
        let num_errors = document.errors().len();
        if num_errors > 0 {
            Err(format!("Check failure: {} error(s)", num_errors))
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Debug, Parser)]
struct Print {
    /// Path to the .vfx or .pipe file to print.
    path: VfxPath,

    /// Print the typed state of the document as JSON.
    #[arg(long)]
    json: bool,
}

impl Print {
    fn run(&self, macros: &Macros) -> Result<(), String> {
        let document = self.path.read(macros)?;
        if !document.is_valid() {
            return Err(format!(
                "Print failure: {} error(s)",
                document.errors().len()
            ));
        }
        if !self.json {
            return document
                .print(&mut std::io::stdout().lock())
                .map_err(|err| format!("failed to write the document: {err}"));
        }
        let json = match document.kind() {
            DocumentKind::Render => document
                .render_state()
                .map_err(|err| err.to_string())
                .and_then(|state| {
                    serde_json::to_string_pretty(&state).map_err(|err| err.to_string())
                }),
            DocumentKind::Pipeline => document
                .pipeline_state()
                .map_err(|err| err.to_string())
                .and_then(|state| {
                    serde_json::to_string_pretty(&state).map_err(|err| err.to_string())
                }),
        }?;
        println!("{json}");
        Ok(())
    }
}

#[derive(Clone, Debug, Parser)]
struct Enums {
    /// Only list enum names that start with this prefix.
    #[arg(default_value = "")]
    prefix: String,
}

impl Enums {
    fn run(&self) -> Result<(), String> {
        let names = vfx::enums::names_with_prefix(&self.prefix);
        if names.is_empty() {
            return Err(format!("no enum names start with `{}`", self.prefix));
        }
        for name in names {
            if let Some(value) = vfx::enums::lookup(name) {
                println!("{name} = {value}");
            }
        }
        Ok(())
    }
}
