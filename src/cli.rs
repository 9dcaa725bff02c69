//! Minimal CLI: parse → (dart | model)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;

use crate::codegen::{FallbackPolicy, GenOptions};
use crate::error::{ConvertError, ParseError};
use crate::model::UnionDeclaration;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// expand hand-written Dart union declarations into sealed-class boilerplate
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// more log output (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// parse and emit the generated Dart
    Dart(DartOut),
    /// parse and print the recovered union model as JSON
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct DartOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// inputs are JSON models written by `model` instead of Dart source
    #[arg(long)]
    from_model: bool,

    /// output .dart file (stdout if omitted; single input only)
    #[arg(short, long, conflicts_with = "in_place")]
    out: Option<PathBuf>,

    /// replace every input file with its generated text
    #[arg(long, conflicts_with = "from_model")]
    in_place: bool,

    /// do not emit the `package:equatable` import
    #[arg(long)]
    no_import: bool,

    /// do not emit the `fromString` factory
    #[arg(long)]
    no_from_string: bool,

    /// what `fromString` does with an unknown label
    #[arg(long, value_enum, default_value_t = FallbackArg::First)]
    fallback: FallbackArg,

    /// suffix of the helper extension name (`<Union><suffix>`)
    #[arg(long, default_value = "Helper")]
    helper_suffix: String,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted; single input only)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FallbackArg {
    /// construct the first declared variant
    First,
    /// throw an ArgumentError
    Throw,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::First => FallbackPolicy::FirstDeclared,
            FallbackArg::Throw => FallbackPolicy::Throw,
        }
    }
}

impl DartOut {
    fn gen_options(&self) -> GenOptions {
        GenOptions {
            equatable_import: !self.no_import,
            from_string: !self.no_from_string,
            fallback: self.fallback.into(),
            helper_suffix: self.helper_suffix.clone(),
        }
    }
}

impl InputSettings {
    fn resolve(&self) -> Result<Vec<PathBuf>> {
        resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")
    }
}

/// Per-file outcome; files are independent, so one bad input never stops
/// the others.
enum Outcome<T> {
    Generated(T),
    NoUnion,
    Failed(anyhow::Error),
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Dart(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let sources = target.input_settings.resolve()?;
                if target.out.is_some() && sources.len() > 1 {
                    bail!("--out takes a single input, got {}", sources.len());
                }
                let options = target.gen_options();

                // each file gets its own parse → generate; order is kept by collect
                let outcomes: Vec<(PathBuf, Outcome<String>)> = sources
                    .into_par_iter()
                    .map(|path| {
                        let outcome = dart_for_file(&path, target.from_model, &options);
                        (path, outcome)
                    })
                    .collect();

                let mut generated = Vec::new();
                let mut failures = 0usize;
                for (path, outcome) in outcomes {
                    match outcome {
                        Outcome::Generated(text) => {
                            if target.in_place {
                                match std::fs::write(&path, &text) {
                                    Ok(()) => {
                                        eprintln!("{} {}", "rewrote".green().bold(), path.display());
                                    }
                                    Err(error) => {
                                        failures += 1;
                                        eprintln!(
                                            "{} {}: failed to write: {error}",
                                            "error".red().bold(),
                                            path.display()
                                        );
                                    }
                                }
                            } else {
                                generated.push(text);
                            }
                        }
                        Outcome::NoUnion => report_no_union(&path),
                        Outcome::Failed(error) => {
                            failures += 1;
                            report_failure(&path, &error);
                        }
                    }
                }

                if !target.in_place {
                    write_output(target.out.as_deref(), &generated.join("\n"))?;
                }
                if failures > 0 {
                    bail!("{failures} input(s) failed");
                }
                Ok(())
            }
            Command::Model(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let sources = target.input_settings.resolve()?;
                if target.out.is_some() && sources.len() > 1 {
                    bail!("--out takes a single input, got {}", sources.len());
                }

                let outcomes: Vec<(PathBuf, Outcome<UnionDeclaration>)> = sources
                    .into_par_iter()
                    .map(|path| {
                        let outcome = model_for_file(&path);
                        (path, outcome)
                    })
                    .collect();

                let mut models = Vec::new();
                let mut failures = 0usize;
                for (path, outcome) in outcomes {
                    match outcome {
                        Outcome::Generated(decl) => models.push(decl),
                        Outcome::NoUnion => report_no_union(&path),
                        Outcome::Failed(error) => {
                            failures += 1;
                            report_failure(&path, &error);
                        }
                    }
                }

                let json_src = match models.as_slice() {
                    [] => String::new(),
                    [single] => serde_json::to_string_pretty(single)?,
                    many => serde_json::to_string_pretty(many)?,
                };
                write_output(target.out.as_deref(), &json_src)?;
                if failures > 0 {
                    bail!("{failures} input(s) failed");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn dart_for_file(path: &Path, from_model: bool, options: &GenOptions) -> Outcome<String> {
    let source = match read_source(path) {
        Ok(x) => x,
        Err(error) => return Outcome::Failed(error),
    };

    let result = if from_model {
        match crate::path_de::model_from_json(&source) {
            // hand-edited models get the same name checks as parsed ones
            Ok(decl) => crate::validate::check_unique(&decl)
                .map_err(ConvertError::from)
                .and_then(|()| crate::codegen::generate(&decl, options).map_err(ConvertError::from)),
            Err(error) => {
                return Outcome::Failed(anyhow::Error::new(error).context("invalid model JSON"));
            }
        }
    } else {
        crate::convert(&source, options)
    };

    match result {
        Ok(text) => {
            tracing::info!(path = %path.display(), bytes = text.len(), "generated union");
            Outcome::Generated(text)
        }
        Err(ConvertError::Parse(ParseError::NotFound)) => Outcome::NoUnion,
        Err(error) => Outcome::Failed(error.into()),
    }
}

fn model_for_file(path: &Path) -> Outcome<UnionDeclaration> {
    let source = match read_source(path) {
        Ok(x) => x,
        Err(error) => return Outcome::Failed(error),
    };
    match crate::parse::parse(&source) {
        Ok(decl) => Outcome::Generated(decl),
        Err(ParseError::NotFound) => Outcome::NoUnion,
        Err(error) => Outcome::Failed(
            anyhow::Error::new(error).context(format!("failed to parse {}", path.display())),
        ),
    }
}

fn report_no_union(path: &Path) {
    eprintln!(
        "{} {}: no union declaration found, nothing generated",
        "skipped".yellow().bold(),
        path.display()
    );
}

fn report_failure(path: &Path, error: &anyhow::Error) {
    eprintln!("{} {}: {error:#}", "error".red().bold(), path.display());
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_dart_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "sealed-gen", "-vv", "dart", "-i", "a.dart", "--no-import", "--fallback", "throw",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Dart(target) = &cli.cmd else { panic!("expected dart command") };
        let options = target.gen_options();
        assert!(!options.equatable_import);
        assert!(options.from_string);
        assert_eq!(options.fallback, FallbackPolicy::Throw);
        assert_eq!(options.helper_suffix, "Helper");
    }

    #[test]
    fn out_and_in_place_conflict() {
        let res = CommandLineInterface::try_parse_from([
            "sealed-gen", "dart", "-i", "a.dart", "-o", "b.dart", "--in-place",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["lib/status.dart"]).unwrap();
        assert_eq!(paths, [PathBuf::from("lib/status.dart")]);
    }

    #[test]
    fn missing_file_is_a_failure_not_a_panic() {
        let outcome = dart_for_file(Path::new("/definitely/not/here.dart"), false, &GenOptions::default());
        assert!(matches!(outcome, Outcome::Failed(_)));
    }

    const STATUS: &str = "class Status {\n  factory Status.loading() = Loading;\n  factory Status.error(String message) = Failure;\n}\n";

    fn run_cli(args: &[&str]) -> Result<()> {
        let mut argv = vec!["sealed-gen"];
        argv.extend_from_slice(args);
        CommandLineInterface::try_parse_from(argv).unwrap().run()
    }

    #[test]
    fn in_place_rewrites_good_files_past_a_bad_one() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("status.dart");
        std::fs::write(&good, STATUS).unwrap();
        let missing = temp.path().join("missing.dart");

        let res = run_cli(&[
            "dart", "-i", missing.to_str().unwrap(), good.to_str().unwrap(), "--in-place",
        ]);
        assert!(res.is_err());

        let rewritten = std::fs::read_to_string(&good).unwrap();
        assert!(rewritten.contains("sealed class Status extends Equatable"));
        assert!(rewritten.contains("final class Failure extends Status"));
    }

    #[test]
    fn out_rejects_several_inputs() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.dart");
        let b = temp.path().join("b.dart");
        std::fs::write(&a, STATUS).unwrap();
        std::fs::write(&b, STATUS).unwrap();
        let out = temp.path().join("out.dart");

        let err = run_cli(&[
            "dart", "-i", a.to_str().unwrap(), b.to_str().unwrap(), "-o", out.to_str().unwrap(),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("--out takes a single input"));
        assert!(!out.exists());
    }

    #[test]
    fn from_model_rejects_duplicate_labels() {
        let temp = TempDir::new().unwrap();
        let model = temp.path().join("dup.json");
        std::fs::write(
            &model,
            r#"{"name":"Dup","variants":[
                {"type_name":"A","factory_label":"x","parameters":[]},
                {"type_name":"B","factory_label":"x","parameters":[]}
            ]}"#,
        )
        .unwrap();

        match dart_for_file(&model, true, &GenOptions::default()) {
            Outcome::Failed(error) => {
                assert_eq!(error.to_string(), "duplicate factory label `x` in union `Dup`");
            }
            _ => panic!("duplicate labels should fail"),
        }

        let out = temp.path().join("dup.dart");
        let res = run_cli(&[
            "dart", "--from-model", "-i", model.to_str().unwrap(), "-o", out.to_str().unwrap(),
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn model_skips_files_without_a_union() {
        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("plain.dart");
        std::fs::write(&plain, "void main() {}\n").unwrap();
        let status = temp.path().join("status.dart");
        std::fs::write(&status, STATUS).unwrap();
        let out = temp.path().join("status.json");

        run_cli(&["model", "-i", plain.to_str().unwrap(), "-o", out.to_str().unwrap()]).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "");

        // one skipped input does not fail the rest of the batch
        let both = temp.path().join("*.dart");
        run_cli(&["model", "-i", both.to_str().unwrap()]).unwrap();

        run_cli(&["model", "-i", status.to_str().unwrap(), "-o", out.to_str().unwrap()]).unwrap();
        let decl = crate::path_de::model_from_json(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(decl.name, "Status");
        assert_eq!(decl.variants.len(), 2);
    }
}
