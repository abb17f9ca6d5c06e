use std::process::Command;

struct Check {
    name: &'static str,
    about: &'static str,
}

fn main() {
    let preamble = "Documentation about the various scripts contained herein\n";

    let checks = [Check {
        name: "check-rados-latency",
        about: "Linux-only. Needs root and the `rados` command line client.",
    }];

    let mut out: String = cp(preamble.split('\n'));
    out.push_str("\n");
    out.push_str(&cp(checks
        .iter()
        .map(|c| format!("- [{0}](#{0})", c.name))));
    out.push_str("\n");
    for check in &checks {
        out.push_str(&format!(
            "\
//!
//! # {0}
//!
//! {1}
//!
//! ```plain
//! $ {0} --help
",
            check.name, check.about
        ));
        let help = match Command::new(&format!("target/debug/{}", check.name))
            .args(&["--help"])
            .output()
        {
            Ok(output) => output.stdout,
            Err(e) => {
                eprintln!("Couldn't execute command {}: {}", check.name, e);
                std::process::exit(1);
            }
        };
        let cout = String::from_utf8_lossy(&help);
        out.push_str(&cp(cout.split('\n')));
        out.push_str("\n//! ```\n");
    }
    out.push_str("\n");
    print!("{}", out);
}

/// Comment each line in the iterator
fn cp<S: AsRef<str>, I: Iterator<Item = S>>(s: I) -> String {
    s.map(|s| format!("//! {}", s.as_ref()))
        .map(|s| s.trim().into())
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::cp;

    #[test]
    fn comments_every_line() {
        assert_eq!(cp("one\n\ntwo".split('\n')), "//! one\n//!\n//! two");
    }
}
