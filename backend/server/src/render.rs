//! # Views
//!
//! Templates are compiled into the binary and parsed once at startup, so a
//! broken template stops the server before it binds instead of on first request.
//!
//! - `index.html`: `persons`, `show`, `squads`
//! - `student.html`: `person`, `squads`
//!
//! Both extend `layout.html`, which lists the squads and titles the page with
//! the `squad_name` global. Output is HTML escaped. Values placed inside a
//! `style` attribute go through the `css_color` filter first, escaping alone
//! does not stop CSS from being injected there.
use std::sync::LazyLock;

use minijinja::{Environment, Error, Value, context};
use regex::Regex;
use whois::{DisplayField, Person, Squad};

const LAYOUT_TEMPLATE: &str = "layout.html";
const INDEX_TEMPLATE: &str = "index.html";
const STUDENT_TEMPLATE: &str = "student.html";

// hex notation or a plain color keyword
static CSS_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#[0-9a-fA-F]{3,8}|[a-zA-Z]{3,24})$").expect("valid color pattern")
});

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new(squad_name: &str) -> Result<Self, Error> {
        let mut env = Environment::new();

        env.add_global("squad_name", squad_name.to_string());
        env.add_filter("css_color", css_color);

        env.add_template(LAYOUT_TEMPLATE, include_str!("../views/layout.html"))?;
        env.add_template(INDEX_TEMPLATE, include_str!("../views/index.html"))?;
        env.add_template(STUDENT_TEMPLATE, include_str!("../views/student.html"))?;

        Ok(Self { env })
    }

    pub fn listing(
        &self,
        persons: &[Person],
        show: DisplayField,
        squads: &[Squad],
    ) -> Result<String, Error> {
        self.env.get_template(INDEX_TEMPLATE)?.render(context! {
            persons,
            show => show.as_str(),
            squads
        })
    }

    pub fn detail(&self, person: &Person, squads: &[Squad]) -> Result<String, Error> {
        self.env
            .get_template(STUDENT_TEMPLATE)?
            .render(context! { person, squads })
    }
}

/// Passes a color through only when it can not carry other declarations.
fn css_color(value: Value) -> String {
    value
        .as_str()
        .map(str::trim)
        .filter(|color| CSS_COLOR.is_match(color))
        .unwrap_or_default()
        .to_string()
}
