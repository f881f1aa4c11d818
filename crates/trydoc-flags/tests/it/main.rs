mod tree;
mod help;

use std::ffi::OsString;

use expect_test::Expect;

fn args(args: &str) -> Vec<OsString> {
    args.split_ascii_whitespace().map(OsString::from).collect()
}

fn check(args_: &str, expect: Expect) {
    let res = trydoc_flags::parse(&tree::tree(), args(args_));
    match res {
        Ok(invocation) => {
            expect.assert_debug_eq(&invocation);
        }
        Err(err) => {
            expect.assert_eq(&err.to_string());
        }
    }
}
