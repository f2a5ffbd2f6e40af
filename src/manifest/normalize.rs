//! Flattening a [`Config`] into the package list the resolver consumes.

use super::Config;
use crate::config::Layout;
use crate::package::Package;

/// Builds the package list from a config.
///
/// Packages come out GitHub first, then Gist, Local and HTTP, each list in
/// its own order. GitHub packages with a `release` and no declared links get
/// the default link `**/<release.name>`. Nothing here touches the
/// filesystem.
pub fn parse(config: &Config, layout: &Layout) -> Vec<Package> {
    let mut packages = Vec::with_capacity(config.package_count());

    for github in &config.github {
        let mut github = github.clone();
        github.apply_release_link();
        packages.push(Package::new(github, layout));
    }
    packages.extend(config.gist.iter().cloned().map(|p| Package::new(p, layout)));
    packages.extend(config.local.iter().cloned().map(|p| Package::new(p, layout)));
    packages.extend(config.http.iter().cloned().map(|p| Package::new(p, layout)));

    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PackageKind;
    use crate::package::{Command, Link, Release};

    fn layout() -> Layout {
        Layout::new("/r", "/b")
    }

    fn config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_fixed_variant_order() {
        let config = config(
            r"
http:
  - {name: h1, url: https://example.com/h1.sh}
local:
  - {name: l1, directory: /tmp/l1}
  - {name: l2, directory: /tmp/l2}
gist:
  - {name: g1, owner: o, id: '1'}
github:
  - {name: gh1, owner: o, repo: r1}
  - {name: gh2, owner: o, repo: r2}
",
        );
        let packages = parse(&config, &layout());
        let names: Vec<&str> = packages.iter().map(Package::name).collect();
        assert_eq!(names, ["gh1", "gh2", "g1", "l1", "l2", "h1"]);
        assert_eq!(packages[2].kind(), PackageKind::Gist);
        assert_eq!(packages[5].kind(), PackageKind::Http);
    }

    #[test]
    fn test_release_without_command_gets_link() {
        let config = config(
            r"
github:
  - name: bar
    owner: foo
    repo: bar
    release:
      name: bar_linux_amd64.tar.gz
      tag: v1.0.0
",
        );
        let packages = parse(&config, &layout());
        let command = packages[0].command().unwrap();
        assert_eq!(command.declared_links(), &[Link::from_pattern("**/bar_linux_amd64.tar.gz")]);
    }

    #[test]
    fn test_release_with_links_untouched() {
        let mut config = config("github:\n  - {name: bar, owner: foo, repo: bar, release: {name: bar, tag: v1}}\n");
        config.github[0].command = Some(Command {
            link: vec![Link::from_pattern("bin/bar")],
            ..Default::default()
        });
        let packages = parse(&config, &layout());
        assert_eq!(packages[0].command().unwrap().declared_links(), &[Link::from_pattern("bin/bar")]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let config = config("github:\n  - {name: bar, owner: foo, repo: bar, release: {name: bar, tag: v1}}\n");
        let once = parse(&config, &layout());

        let mut again = config.clone();
        again.github[0].apply_release_link();
        let twice = parse(&again, &layout());

        assert_eq!(once, twice);
        assert_eq!(twice[0].command().unwrap().declared_links().len(), 1);
    }

    #[test]
    fn test_release_name_survives() {
        let config = config("github:\n  - {name: bar, owner: foo, repo: bar, release: {name: bar, tag: v1}}\n");
        let packages = parse(&config, &layout());
        assert_eq!(
            packages[0].release(),
            Some(&Release {
                name: "bar".to_string(),
                tag: "v1".to_string(),
            })
        );
    }
}
