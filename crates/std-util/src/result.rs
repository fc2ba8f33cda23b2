/// Unwraps the `Err` side of a result, panicking with the `Ok` value otherwise.
///
/// The optional `contains = [..]` form additionally checks that the rendered
/// error mentions every listed fragment, which is how diagnostics are
/// asserted to name the declaring class and member.
#[macro_export]
macro_rules! assert_err {
    ($e:expr, contains = [ $($needle:expr),+ $(,)? ]) => {{
        let err = $crate::assert_err!($e);
        let msg = err.to_string();
        $(
            assert!(
                msg.contains($needle),
                "expected error to mention `{}`; actual={}",
                $needle,
                msg
            );
        )+
        err
    }};
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            actual => {
                use std::fmt::Write;
                let mut msg = format!("expected `Err`; actual={:?}", actual);

                $(
                    write!(msg, ", ").unwrap();
                    write!(msg, $($t)*).unwrap();
                )?

                panic!("{}", msg);
            }
        }
    };
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => panic!("expected `Ok`; error={}", e),
        }
    };
}
