#![no_main]

use libfuzzer_sys::fuzz_target;
use libfuzzer_sys::arbitrary::{Arbitrary, Unstructured};
use rest_wire::auth::AuthRegistry;
use rest_wire::connection::Settings;

#[derive(Debug)]
struct IdentifierInput {
    identifier: String,
    user: Option<String>,
    token: Option<String>,
}

impl<'a> Arbitrary<'a> for IdentifierInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> libfuzzer_sys::arbitrary::Result<Self> {
        Ok(Self {
            identifier: u.arbitrary()?,
            user: u.arbitrary()?,
            token: u.arbitrary()?,
        })
    }
}

fuzz_target!(|input: IdentifierInput| {
    let mut builder = Settings::builder("default", "https://api.example.com/db/");
    if let Some(user) = input.user {
        builder = builder.user(user);
    }
    if let Some(token) = input.token {
        builder = builder.option("TOKEN", token);
    }
    let Ok(settings) = builder.build() else {
        return;
    };

    let registry = AuthRegistry::with_builtins();
    if let Ok(strategy) = registry.resolve(&input.identifier, &settings) {
        assert!(registry.contains(&input.identifier));
        let _ = strategy.name();
    }
});
