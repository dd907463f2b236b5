#![no_main]

use cowsay_core::{layout, render, Width, COW_ART};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&w, rest)) = data.split_first() else {
        return;
    };
    let Ok(width) = Width::new(usize::from(w)) else {
        return;
    };
    let Ok(msg) = std::str::from_utf8(rest) else {
        return;
    };
    if msg.contains('\n') {
        return;
    }

    let out = render(msg, width);
    let lay = layout(msg, width);

    let body = out.strip_suffix(COW_ART).expect("cow art suffix");
    let lines: Vec<&str> = body.split('\n').collect();
    assert_eq!(lines.len(), lay.lines + 2);
    assert_eq!(lines[0].chars().count(), lay.border_len + 1);
    assert_eq!(lines[lines.len() - 1].chars().count(), lay.border_len + 1);

    if !lay.wrapped {
        assert_eq!(lines[1], format!("< {msg} >"));
        return;
    }

    let mut joined = String::new();
    for line in &lines[1..lines.len() - 1] {
        assert_eq!(line.chars().count(), width.get() + 4);
        joined.extend(line.chars().skip(2).take(width.get()));
    }
    assert!(joined.starts_with(msg));
    assert!(joined[msg.len()..].chars().all(|c| c == ' '));
});
