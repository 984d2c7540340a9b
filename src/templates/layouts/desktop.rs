use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="de" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                header {
                    h3 { "Wohnungsfinder" }
                    nav {
                        ul {
                            li { a href="/" { "Status" } }
                            li { a href="/api/view" { "Listings" } }
                        }
                    }
                }
                main {
                    (content)
                }
            }
        }
    }
}
