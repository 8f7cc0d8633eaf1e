use git_version::git_version;

const GIT_DESCRIBE: &str = git_version!(
    args = ["--always", "--dirty=-modified", "--tags"],
    fallback = ""
);

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = if GIT_DESCRIBE.is_empty() {
        println!("cargo:warning=git describe unavailable, using package version");
        env!("CARGO_PKG_VERSION")
    } else {
        GIT_DESCRIBE
    };
    println!("cargo:rustc-env=APP_VERSION={version}");
}
