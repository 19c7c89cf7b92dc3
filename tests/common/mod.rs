#![allow(dead_code)]
//! HTML fixtures shaped like the discovery and profile pages.

/// A discovery table; even and odd rows are interleaved the way the site renders them.
pub fn roster_page(even: &[&str], odd: &[&str]) -> String {
    let mut rows = String::new();
    let longest = even.len().max(odd.len());
    for i in 0..longest {
        if let Some(name) = odd.get(i) {
            rows.push_str(&roster_row("oddrow", i, name));
        }
        if let Some(name) = even.get(i) {
            rows.push_str(&roster_row("evenrow", i, name));
        }
    }

    format!(
        r#"<html><body><table class="tablehead">
            <tr class="stathead"><td>Fighters</td></tr>
            <tr class="colhead"><td>NAME</td><td>COUNTRY</td></tr>
            {rows}
        </table></body></html>"#
    )
}

fn roster_row(class: &str, id: usize, name: &str) -> String {
    format!(
        r#"<tr class="{class}">
            <td><a href="/mma/fighter/_/id/{id}">{name}</a></td>
            <td>USA</td>
        </tr>"#
    )
}

/// A profile page. Every region can be overridden to build malformed variants.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub name: String,
    pub nickname: Option<String>,
    pub division: String,
    pub record: String,
    pub age: String,
    pub tags: Vec<String>,
    pub stats: Vec<String>,
    pub percents: Vec<String>,
    pub bio: Vec<String>,
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            nickname: Some("\"The Hammer\"".into()),
            division: "Lightweight Division".into(),
            record: "20-3-0 (W-L-D)".into(),
            age: "30".into(),
            tags: strings(&["#5 Lightweight Division", "Active"]),
            stats: strings(&["5", "3"]),
            percents: strings(&["80%", "60%"]),
            bio: strings(&[
                "Active",
                "Denver, United States",
                "Jackson Wink MMA",
                "Brazilian Jiu-Jitsu",
                "30",
                "72",
                "155",
                "Oct. 1, 2015",
                "74",
            ]),
        }
    }
}

impl ProfilePage {
    pub fn named(name: &str, age: &str, stats: &[&str], percents: &[&str]) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            stats: strings(stats),
            percents: strings(percents),
            ..Self::default()
        }
    }

    pub fn render(&self) -> String {
        let nickname = self
            .nickname
            .as_ref()
            .map(|n| format!(r#"<p class="hero-profile__nickname">{n}</p>"#))
            .unwrap_or_default();
        let tags: String = self
            .tags
            .iter()
            .map(|t| format!(r#"<div class="hero-profile__tag"><p>{t}</p></div>"#))
            .collect();
        let stats: String = self
            .stats
            .iter()
            .map(|s| {
                format!(
                    r#"<div class="hero-profile__stat">
                        <div class="hero-profile__stat-numb"><p>{s}</p></div>
                        <p class="hero-profile__stat-text">Wins</p>
                    </div>"#
                )
            })
            .collect();
        let percents: String = self
            .percents
            .iter()
            .map(|p| {
                format!(
                    r#"<svg class="e-chart-circle">
                        <text class="e-chart-circle__percent" x="50%" y="50%">{p}</text>
                    </svg>"#
                )
            })
            .collect();
        let bio: String = self
            .bio
            .iter()
            .map(|b| {
                format!(
                    r#"<div class="c-bio__field">
                        <div class="c-bio__label">Label</div>
                        <div class="c-bio__text"><div>{b}</div></div>
                    </div>"#
                )
            })
            .collect();

        format!(
            r#"<html><body>
            <div class="hero-profile">
                <div class="hero-profile__tags">{tags}</div>
                <div class="hero-profile__nickname-wrap">{nickname}</div>
                <h1 class="hero-profile__name">{name}</h1>
                <div class="hero-profile__division">
                    <p class="hero-profile__division-title">{division}</p>
                    <p class="hero-profile__division-body">{record}</p>
                </div>
                <div class="hero-profile__stats">{stats}</div>
            </div>
            <div class="c-overlap__chart">{percents}</div>
            <div class="c-bio">
                <div class="field field--name-age field--label-hidden">{age}</div>
                {bio}
            </div>
            </body></html>"#,
            name = self.name,
            division = self.division,
            record = self.record,
            age = self.age,
        )
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
