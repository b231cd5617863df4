use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
              header class="page-header" {
                  h3 { "Proposal Management" }
                  nav {
                      ul {
                          li { a href="/proposals" { "Proposals" } }
                          li { a href="/proposals/new" { "Create Suggested Proposal" } }
                          li { a href="/_relationships" { "Go to relationships" } }
                      }
                  }
              }
                main class="container" {
                    (content)
                }
            }
        }
    }
}
