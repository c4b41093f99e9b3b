use std::fmt::Display;

pub fn paren_expr<S>(s: S) -> String
where S: Display {
    let s = s.to_string();
    if s.contains(' ') { 
        format!("({s})")
    } else { 
        s
    }
}

/// Formats a linear combination `Σ rᵢ xᵢ`, with `x = "1"` for constant terms. 
/// An empty combination is `"0"`.
pub fn lc<X, R, S>(terms: S) -> String
where 
    X: Display, 
    R: Display, 
    S: IntoIterator<Item = (X, R)>
{ 
    let mut res = String::new();

    for (i, (x, r)) in terms.into_iter().enumerate() {
        let r = paren_expr(r);
        let x = x.to_string();

        let (neg, r) = match r.strip_prefix('-') { 
            Some(r) => (true, r.to_owned()),
            None    => (false, r)
        };

        let term = if x == "1" { 
            r
        } else if r == "1" { 
            x
        } else { 
            format!("{r}{x}")
        };

        match (i, neg) { 
            (0, false) => {},
            (0, true)  => res.push('-'),
            (_, false) => res.push_str(" + "),
            (_, true)  => res.push_str(" - "),
        }
        res.push_str(&term);
    }

    if res.is_empty() { 
        res.push('0')
    }

    res
}

fn digits(mut i: usize) -> Vec<u32> { 
    let mut ds = vec![];
    loop { 
        ds.push((i % 10) as u32);
        i /= 10;
        if i == 0 { break }
    }
    ds.reverse();
    ds
}

pub fn subscript(i: isize) -> String {
    let mut res = String::new();
    if i < 0 { 
        res.push('\u{208B}')
    }
    for d in digits(i.unsigned_abs()) { 
        res.push(char::from_u32(0x2080 + d).unwrap_or('?'))
    }
    res
}

pub fn superscript(i: isize) -> String { 
    let mut res = String::new();
    if i < 0 { 
        res.push('\u{207B}')
    }
    for d in digits(i.unsigned_abs()) { 
        let c = match d { 
            1 => '\u{00B9}',
            2 => '\u{00B2}',
            3 => '\u{00B3}',
            _ => char::from_u32(0x2070 + d).unwrap_or('?')
        };
        res.push(c)
    }
    res
}

/// `x`, `x²`, `x⁻¹`, or `1` for the zeroth power.
pub fn power(x: &str, e: isize) -> String { 
    match e { 
        0 => String::from("1"),
        1 => x.to_string(),
        _ => format!("{x}{}", superscript(e))
    }
}
