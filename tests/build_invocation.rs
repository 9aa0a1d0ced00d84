use std::error::Error;

use pathprobe::invocation::{InvocationSpec, ProbeMethod};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn method_flag_goes_after_extra_arguments() -> TestResult {
    // The utility honors the last occurrence of a conflicting flag, so
    // the explicit udp method must override a stale "-T" in the extras.
    let spec = InvocationSpec::new("example.com", ProbeMethod::Udp)
        .with_arguments(["-T".to_string()]);

    let argv = spec.argv("traceroute");
    assert_eq!(argv, vec!["traceroute", "-T", "-U", "example.com"]);

    Ok(())
}

#[test]
fn each_known_method_maps_to_its_flag() -> TestResult {
    assert_eq!(ProbeMethod::Udp.flag(), Some("-U"));
    assert_eq!(ProbeMethod::Tcp.flag(), Some("-T"));
    assert_eq!(ProbeMethod::Icmp.flag(), Some("-I"));
    assert_eq!(ProbeMethod::Custom("paris".into()).flag(), None);

    Ok(())
}

#[test]
fn custom_method_adds_no_flag() -> TestResult {
    let spec = InvocationSpec::new("example.com", ProbeMethod::from("paris"))
        .with_arguments(["-q".to_string(), "1".to_string()]);

    let argv = spec.argv("traceroute");
    assert_eq!(argv, vec!["traceroute", "-q", "1", "example.com"]);

    Ok(())
}

#[test]
fn argv_leaves_the_spec_untouched() -> TestResult {
    let spec = InvocationSpec::new("example.com", ProbeMethod::Tcp)
        .with_arguments(["-m".to_string(), "15".to_string()]);

    let first = spec.argv("traceroute");
    let second = spec.argv("traceroute");

    // Each call builds a fresh vector; no flags accumulate across calls.
    assert_eq!(first, second);
    assert_eq!(spec.cmd_arguments, vec!["-m", "15"]);

    Ok(())
}

#[test]
fn method_parses_from_strings() -> TestResult {
    assert_eq!(ProbeMethod::from("udp"), ProbeMethod::Udp);
    assert_eq!(ProbeMethod::from("tcp"), ProbeMethod::Tcp);
    assert_eq!(ProbeMethod::from("icmp"), ProbeMethod::Icmp);
    assert_eq!(
        ProbeMethod::from("dccp"),
        ProbeMethod::Custom("dccp".into())
    );
    assert_eq!(ProbeMethod::from("dccp").as_str(), "dccp");
    assert_eq!(ProbeMethod::default(), ProbeMethod::Udp);

    Ok(())
}
