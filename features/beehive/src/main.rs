use std::sync::Arc;

use beehive::{Blueprint, Builder, Hive, HiveError, Identifier, Injection};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), HiveError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut hive = Hive::new();
    hive.register_value(123_i32)?;
    hive.register_fn(|i: Arc<i32>| format!("func({i})"))?;
    hive.register_value_named("greeting", "hello".to_string())?;

    Builder::<String>::new()
        .name("shout")
        .deps([Identifier::named::<String>("greeting")])
        .func(|greeting: Arc<String>| greeting.to_uppercase())
        .register(&mut hive)?;

    hive.register_blueprint::<Test>()?;
    hive.check()?;

    println!("{:?}", hive);
    let t = hive.get::<Test>()?;
    println!("{:?}", t);
    println!("{:?}", hive);

    Ok(())
}

#[derive(Debug, Default)]
struct Test {
    a: Arc<String>,
    shout: Arc<String>,
}
impl Blueprint for Test {
    fn injections() -> Vec<Injection<Self>> {
        vec![
            Injection::field(|test: &mut Self, a: Arc<String>| test.a = a),
            Injection::named("shout", |test: &mut Self, shout: Arc<String>| {
                test.shout = shout
            }),
        ]
    }
}
