//! Integration test: end-to-end template rendering.
//!
//! Exercises the public `render` entry point against the documented
//! formatting properties: canonical decimal output, base prefixes,
//! width round-trips, alignment symmetry, indexing-mode rules and
//! special floating-point values.
//!
//! Run: cargo test -p bracefmt-core --test format_test

use bracefmt_core::{FormatArg, FormatError, Formatter, args, render};

fn ok(template: &str, args: &[FormatArg<'_>]) -> String {
    String::from_utf8(render(template, args).unwrap()).unwrap()
}

fn err(template: &str, args: &[FormatArg<'_>]) -> FormatError {
    render(template, args).unwrap_err()
}

// ---------------------------------------------------------------------------
// 1. Canonical decimal rendering
// ---------------------------------------------------------------------------

#[test]
fn decimal_is_canonical_for_sampled_integers() {
    let values: &[i64] = &[
        0,
        1,
        -1,
        9,
        10,
        99,
        100,
        12345,
        -98765,
        i64::from(i32::MAX),
        i64::from(i32::MIN),
        i64::MAX,
        i64::MIN,
    ];
    for &v in values {
        assert_eq!(ok("{}", &args![v]), v.to_string(), "value {v}");
        assert_eq!(ok("{:d}", &args![v]), v.to_string(), "value {v}");
    }
}

#[test]
fn decimal_has_no_leading_zeros() {
    assert_eq!(ok("{}", &args![0]), "0");
    assert_eq!(ok("{}", &args![7u32]), "7");
    assert_eq!(ok("{}", &args![u64::MAX]), "18446744073709551615");
}

// ---------------------------------------------------------------------------
// 2. Alternate-form prefixes and bit patterns
// ---------------------------------------------------------------------------

#[test]
fn alternate_form_prefixes() {
    assert_eq!(ok("{:#x}", &args![255]), "0xff");
    assert_eq!(ok("{:#X}", &args![255]), "0XFF");
    assert_eq!(ok("{:#o}", &args![8]), "010");
    assert_eq!(ok("{:#06x}", &args![255]), "0x00ff");
}

#[test]
fn hex_and_octal_render_unsigned_bit_patterns() {
    assert_eq!(ok("{:x}", &args![-1]), "ffffffff");
    assert_eq!(ok("{:x}", &args![-1i64]), "ffffffffffffffff");
    assert_eq!(ok("{:X}", &args![i32::MIN]), "80000000");
    assert_eq!(ok("{:o}", &args![-1]), "37777777777");
}

// ---------------------------------------------------------------------------
// 3. Width round-trips and alignment
// ---------------------------------------------------------------------------

#[test]
fn rendered_length_is_exactly_width_when_content_fits() {
    // width 0 is spelled as an absent width
    assert_eq!(render("{}", &args!["ab"]).unwrap().len(), 2);
    for width in 1..=32usize {
        let template = format!("{{:{width}}}");
        let out = render(&template, &args!["ab"]).unwrap();
        assert_eq!(out.len(), width.max(2), "width {width}");
    }
}

#[test]
fn no_truncation_when_content_exceeds_width() {
    assert_eq!(ok("{:3}", &args!["abcdef"]), "abcdef");
    assert_eq!(ok("{:2}", &args![123456]), "123456");
}

#[test]
fn center_alignment_is_symmetric_within_one_fill() {
    for width in 2..=21usize {
        let template = format!("{{:^{width}}}");
        let out = ok(&template, &args!["ab"]);
        let left = out.len() - out.trim_start().len();
        let right = out.len() - out.trim_end().len();
        assert!(left <= right, "width {width}: left {left}, right {right}");
        assert!(right - left <= 1, "width {width}");
    }
}

#[test]
fn center_scenario_from_documentation() {
    assert_eq!(ok("{:^10}", &args!["ab"]), "    ab    ");
}

#[test]
fn explicit_fill_characters() {
    assert_eq!(ok("{:*<7}", &args![42]), "42*****");
    assert_eq!(ok("{:.>7}", &args!["x"]), "......x");
    assert_eq!(ok("{:0=7}", &args![-42]), "-000042");
}

// ---------------------------------------------------------------------------
// 4. Indexing rules
// ---------------------------------------------------------------------------

#[test]
fn manual_indexing_scenario() {
    assert_eq!(
        ok("{0}, {1}!", &args!["Hello", "World"]),
        "Hello, World!"
    );
}

#[test]
fn switching_indexing_modes_fails_both_ways() {
    assert!(matches!(
        err("{0}{}", &args![1, 2]),
        FormatError::IndexingModeConflict { .. }
    ));
    assert!(matches!(
        err("{}{0}", &args![1, 2]),
        FormatError::IndexingModeConflict { .. }
    ));
}

#[test]
fn out_of_range_manual_index_fails() {
    assert!(matches!(
        err("{5}", &args![1, 2]),
        FormatError::ArgumentIndexOutOfRange { index: 5, len: 2, .. }
    ));
}

// ---------------------------------------------------------------------------
// 5. Floating point
// ---------------------------------------------------------------------------

#[test]
fn forced_sign_fixed_precision_scenario() {
    assert_eq!(ok("{:+.2f}", &args![3.14159]), "+3.14");
}

#[test]
fn special_values_are_stable_across_codes_and_precisions() {
    for template in ["{}", "{:e}", "{:f}", "{:g}", "{:.3e}", "{:.0f}", "{:.5g}"] {
        assert_eq!(ok(template, &args![f64::NAN]), "nan", "{template}");
        assert_eq!(ok(template, &args![f64::INFINITY]), "inf", "{template}");
        assert_eq!(
            ok(template, &args![f64::NEG_INFINITY]),
            "-inf",
            "{template}"
        );
    }
    assert_eq!(ok("{:E}", &args![f64::NAN]), "NAN");
    assert_eq!(ok("{:F}", &args![f64::INFINITY]), "INF");
}

#[test]
fn negative_zero_keeps_its_sign() {
    assert_eq!(ok("{}", &args![-0.0]), "-0");
    assert_eq!(ok("{:.1f}", &args![-0.0]), "-0.0");
}

#[test]
fn default_rendering_round_trips() {
    for v in [0.5, 1.5, 3.14, 250.0, 1e-7] {
        let out = ok("{}", &args![v]);
        assert_eq!(out.parse::<f64>().unwrap(), v, "value {v}");
    }
}

#[test]
fn scientific_and_fixed_codes() {
    assert_eq!(ok("{:.3e}", &args![1234.5678]), "1.235e+03");
    assert_eq!(ok("{:e}", &args![0.0]), "0.000000e+00");
    assert_eq!(ok("{:f}", &args![2.5]), "2.500000");
    assert_eq!(ok("{:.0f}", &args![2.5]), "2");
}

#[test]
fn float_padding_and_alignment() {
    assert_eq!(ok("{:10.2f}", &args![3.5]), "      3.50");
    assert_eq!(ok("{:<10.2f}", &args![3.5]), "3.50      ");
    assert_eq!(ok("{:^10.2f}", &args![3.5]), "   3.50   ");
    assert_eq!(ok("{:08.2f}", &args![-3.5]), "-0003.50");
}

#[test]
fn extended_precision_arguments_format_like_doubles() {
    assert_eq!(
        ok("{:.2f}", &[FormatArg::LongDouble(1.2345)]),
        "1.23"
    );
}

// ---------------------------------------------------------------------------
// 6. Strings, chars, pointers
// ---------------------------------------------------------------------------

#[test]
fn string_and_char_codes() {
    assert_eq!(ok("{:s}", &args!["text"]), "text");
    assert_eq!(ok("{:c}", &args![b'x']), "x");
    assert_eq!(ok("{:5c}", &args![b'x']), "    x");
}

#[test]
fn pointer_renders_as_alternate_hex() {
    assert_eq!(ok("{}", &[FormatArg::pointer(0xdead_beef)]), "0xdeadbeef");
    assert_eq!(ok("{:p}", &[FormatArg::pointer(0x10)]), "0x10");
}

#[test]
fn byte_payloads_need_no_utf8() {
    let payload: &[u8] = &[0xff, 0xfe];
    let out = render("[{}]", &[FormatArg::from(payload)]).unwrap();
    assert_eq!(out, b"[\xff\xfe]");
}

// ---------------------------------------------------------------------------
// 7. Unsupported extension: width from argument
// ---------------------------------------------------------------------------

#[test]
fn width_from_argument_is_rejected() {
    assert!(matches!(
        err("{:{1}}", &args!["hi", 5]),
        FormatError::UnmatchedBrace { .. } | FormatError::IndexingModeConflict { .. }
    ));
}

// ---------------------------------------------------------------------------
// 8. Formatter reuse
// ---------------------------------------------------------------------------

#[test]
fn formatter_accumulates_across_templates() {
    let mut f = Formatter::new();
    f.format("({:+f}, ", &args![3.14]).unwrap();
    f.format("{:+f})", &args![-3.14]).unwrap();
    assert_eq!(f.as_bytes(), b"(+3.140000, -3.140000)");
}

#[test]
fn errors_do_not_poison_the_formatter() {
    let mut f = Formatter::new();
    assert!(f.format("{5}", &args![1]).is_err());
    f.clear();
    f.format("{}", &args![1]).unwrap();
    assert_eq!(f.as_bytes(), b"1");
}
