use std::fmt::Write;

use crate::ast::{Cmd, Flag, Ty};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

/// Renders help for the command reached by following `path` from `root`.
///
/// Hidden subcommands are left out of listings, but asking for one by name
/// still shows its own help.
pub fn render<H>(root: &Cmd<H>, path: &[&str]) -> String {
    let mut cmd = root;
    let mut prefix = String::new();
    for name in path {
        match cmd.find_subcommand(name) {
            Some(sub) => {
                prefix.push_str(&cmd.name);
                prefix.push(' ');
                cmd = sub;
            }
            None => break,
        }
    }

    let mut buf = String::new();
    help_rec(&mut buf, &prefix, cmd);
    buf.truncate(buf.trim_end().len());
    buf.push('\n');
    buf
}

fn help_rec<H>(buf: &mut String, prefix: &str, cmd: &Cmd<H>) {
    w!(buf, "{prefix}{}\n", cmd.name);
    if let Some(doc) = &cmd.doc {
        write_lines_indented(buf, doc, 2);
    }
    let indent = if prefix.is_empty() { "" } else { "  " };

    if let Some(arg) = &cmd.arg {
        blank_line(buf);
        w!(buf, "{indent}ARGS:\n");
        let (l, r) = if arg.is_required() { ("<", ">") } else { ("[", "]") };
        w!(buf, "    {l}{}{r}\n", arg.name);
        if let Some(doc) = &arg.doc {
            write_lines_indented(buf, doc, 6)
        }
    }

    blank_line(buf);
    w!(buf, "{indent}OPTIONS:\n");
    for flag in &cmd.flags {
        w!(buf, "    {}{}\n", aliases(flag), value_hint(flag.arg.ty));
        if let Some(doc) = &flag.doc {
            write_lines_indented(buf, doc, 6);
        }
        blank_line(buf);
    }
    w!(buf, "    -h, --help\n");
    write_lines_indented(buf, "Prints help information.", 6);

    let subcommands = cmd.visible_subcommands().collect::<Vec<_>>();
    if !subcommands.is_empty() {
        if prefix.is_empty() {
            blank_line(buf);
            w!(buf, "SUBCOMMANDS:");
        }

        let prefix = format!("{prefix}{} ", cmd.name);
        for sub in subcommands {
            blank_line(buf);
            blank_line(buf);
            help_rec(buf, &prefix, sub);
        }
    }
}

/// Short aliases first, then long ones in declaration order.
fn aliases(flag: &Flag) -> String {
    let (short, long): (Vec<&str>, Vec<&str>) =
        flag.aliases.iter().map(String::as_str).partition(|it| !it.starts_with("--"));
    short.into_iter().chain(long).collect::<Vec<_>>().join(", ")
}

fn value_hint(ty: Ty) -> String {
    match ty {
        Ty::Bool => String::new(),
        _ => format!(" <{ty}>"),
    }
}

fn write_lines_indented(buf: &mut String, multiline_str: &str, indent: usize) {
    for line in multiline_str.split('\n').map(str::trim_end) {
        if line.is_empty() {
            w!(buf, "\n")
        } else {
            w!(buf, "{blank:indent$}{line}\n", blank = "");
        }
    }
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
