//! iPXE menu synthesis
//!
//! Turns the image catalog into a forest of interlinked menu scripts: one
//! root menu plus one script per category with at least one enabled image.
//! Generation is deterministic; the same catalog produces byte-identical
//! output regardless of insertion order.

use emberfly_common::catalog::{group_enabled, validate_catalog, CategoryGroup};
use emberfly_common::{Image, ImageKind, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Baseline kernel arguments applied when an image carries a squashfs but no
/// explicit `boot_args`.
pub const DEFAULT_BOOT_ARGS: &str = "boot=casper netboot=url ip=dhcp";

/// Relative path prefix under which fetchable assets live. Paths starting
/// with it are rewritten to absolute URLs under the boot server.
const ASSET_PREFIX: &str = "assets/";

/// Configuration for menu generation
#[derive(Debug, Clone)]
pub struct MenuBuilder {
    /// Address clients fetch menus and assets from (e.g. "192.168.1.20")
    server_address: String,

    /// Path prefix under the HTTP server root
    http_root: String,

    /// Menu title shown on the root menu header
    title: String,
}

impl MenuBuilder {
    /// Create a builder for the given boot server address
    pub fn new(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            http_root: "netboot".to_string(),
            title: "Emberfly NetBoot".to_string(),
        }
    }

    /// Set the path prefix under the HTTP server root
    pub fn with_http_root(mut self, root: impl Into<String>) -> Self {
        self.http_root = root.into();
        self
    }

    /// Set the root menu title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn base_url(&self) -> String {
        format!("http://{}/{}", self.server_address, self.http_root)
    }

    /// Synthesize the full menu forest: a map from generated file name to
    /// file content. One root `main.ipxe` plus one `<category>.ipxe` per
    /// category with at least one enabled image.
    ///
    /// The catalog is validated first; nothing is generated on a validation
    /// error.
    pub fn render(&self, images: &[Image]) -> Result<BTreeMap<String, String>> {
        validate_catalog(images)?;
        let groups = group_enabled(images);

        let mut files = BTreeMap::new();
        files.insert("main.ipxe".to_string(), self.root_menu(&groups));
        for group in &groups {
            files.insert(format!("{}.ipxe", group.token), self.category_menu(group));
        }
        Ok(files)
    }

    /// Root menu: category items sorted by token, a fixed system block with a
    /// 30 second countdown defaulting to local boot, then the category jump
    /// sections in first-seen catalog order. The two orders differ on
    /// purpose; the jump sections are plain anchors and their order is not
    /// user visible.
    fn root_menu(&self, groups: &[CategoryGroup<'_>]) -> String {
        let mut menu = format!(
            "#!ipxe\n\n:main_menu\nmenu {} - Main Menu\nitem --gap -- Boot Options:\n",
            self.title
        );

        let mut sorted: Vec<&CategoryGroup<'_>> = groups.iter().collect();
        sorted.sort_by_key(|g| g.token);
        for group in sorted {
            menu.push_str(&format!("item {}_menu {}\n", group.token, group.display_name));
        }

        menu.push_str(
            "item --gap -- System:\n\
             item local Boot from Local Disk\n\
             item shell iPXE Shell\n\
             item reboot Reboot\n\
             item exit Exit to BIOS\n\
             item --gap --\n\
             choose --timeout 30000 --default local selected && goto ${selected}\n\n\
             :local\n\
             echo Booting from local disk...\n\
             exit\n\n\
             :shell\n\
             shell\n\n\
             :reboot\n\
             reboot\n\n\
             :exit\n\
             exit\n\n",
        );

        for group in groups {
            menu.push_str(&format!(
                ":{token}_menu\nchain ${{base_url}}/menus/{token}.ipxe || goto main_menu\n\n",
                token = group.token
            ));
        }

        menu
    }

    /// One category menu: item list, back link, then a labeled boot section
    /// per image, ending with the jump back to the root menu.
    fn category_menu(&self, group: &CategoryGroup<'_>) -> String {
        let mut menu = format!(
            "#!ipxe\n\n:{}_menu\nmenu {}\nitem --gap -- Available Images:\n",
            group.token, group.display_name
        );

        for img in &group.images {
            // The list is already filtered to enabled images, so this tag is
            // always [Enabled] in practice; kept as observed behavior.
            let status = if img.enabled { "[Enabled]" } else { "[Disabled]" };
            menu.push_str(&format!("item {} {} {}\n", img.id, img.name, status));
        }

        menu.push_str(
            "item --gap --\n\
             item back_main Back to Main Menu\n\
             choose selected && goto ${selected}\n\n",
        );

        for img in &group.images {
            self.boot_section(&mut menu, img, group.token);
        }

        menu.push_str(":back_main\nchain ${base_url}/menus/main.ipxe\n");
        menu
    }

    /// Append the labeled boot section for one image.
    ///
    /// Local images get a bare `exit` that hands control back to the chain
    /// loader. Network images without a kernel path get no section at all;
    /// the item stays listed but selecting it falls through, matching the
    /// catalog format this replaces.
    fn boot_section(&self, menu: &mut String, img: &Image, category: &str) {
        if img.kind == ImageKind::Local {
            menu.push_str(&format!(":{}\nexit\n\n", img.id));
            return;
        }

        let Some(kernel) = img.kernel.as_deref() else {
            debug!(image = %img.id, "network image has no kernel path, skipping boot section");
            return;
        };

        menu.push_str(&format!(":{}\n", img.id));
        menu.push_str(&format!("set base_url {}\n", self.base_url()));
        menu.push_str(&format!("kernel {}\n", rewrite_asset_path(kernel)));

        if let Some(initrd) = img.initrd.as_deref() {
            menu.push_str(&format!("initrd {}\n", rewrite_asset_path(initrd)));
        }

        if let Some(squashfs) = img.squashfs.as_deref() {
            // The squashfs URL ends up in kernel arguments, where iPXE does
            // not interpolate ${base_url}, so it is rewritten to an absolute
            // URL instead.
            let args = img.boot_args.as_deref().unwrap_or(DEFAULT_BOOT_ARGS);
            let url = self.absolute_asset_url(squashfs);
            menu.push_str(&format!("imgargs vmlinuz {args} url={url}\n"));
        } else if let Some(args) = img.boot_args.as_deref() {
            menu.push_str(&format!("imgargs vmlinuz {args}\n"));
        }

        menu.push_str(&format!("boot || goto {category}_menu\n\n"));
    }

    fn absolute_asset_url(&self, path: &str) -> String {
        match path.strip_prefix(ASSET_PREFIX) {
            Some(rest) => format!("{}/{}{}", self.base_url(), ASSET_PREFIX, rest),
            None => path.to_string(),
        }
    }

    /// The chainload entry script (`boot.ipxe`): sets the base URL variable
    /// the menu forest interpolates and chains into the root menu.
    pub fn entry_script(&self) -> String {
        format!(
            "#!ipxe\n\n\
             echo Emberfly Network Boot\n\
             echo MAC: ${{mac}}\n\
             echo\n\n\
             set base_url {}\n\
             chain ${{base_url}}/menus/main.ipxe\n",
            self.base_url()
        )
    }
}

/// Rewrite a conventional asset path to interpolate under `${base_url}`.
/// Paths outside the asset prefix pass through untouched.
fn rewrite_asset_path(path: &str) -> String {
    match path.strip_prefix(ASSET_PREFIX) {
        Some(rest) => format!("${{base_url}}/{ASSET_PREFIX}{rest}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfly_common::Error;

    fn network_image(id: &str, category: &str) -> Image {
        Image {
            id: id.to_string(),
            name: format!("Image {id}"),
            category: category.to_string(),
            enabled: true,
            kind: ImageKind::Network,
            kernel: Some(format!("assets/{id}/vmlinuz")),
            initrd: Some(format!("assets/{id}/initrd")),
            squashfs: None,
            boot_args: None,
        }
    }

    fn builder() -> MenuBuilder {
        MenuBuilder::new("192.168.1.20")
    }

    #[test]
    fn test_render_produces_root_and_category_files() {
        let images = vec![network_image("u1", "ubuntu"), network_image("d1", "debian")];
        let files = builder().render(&images).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.contains_key("main.ipxe"));
        assert!(files.contains_key("ubuntu.ipxe"));
        assert!(files.contains_key("debian.ipxe"));
        for content in files.values() {
            assert!(content.starts_with("#!ipxe"));
        }
    }

    #[test]
    fn test_disabled_images_absent_everywhere() {
        let mut off = network_image("ghost", "ubuntu");
        off.enabled = false;
        let images = vec![network_image("u1", "ubuntu"), off];

        let files = builder().render(&images).unwrap();
        for content in files.values() {
            assert!(!content.contains("ghost"));
        }
    }

    #[test]
    fn test_empty_category_produces_no_file() {
        let mut off = network_image("d1", "debian");
        off.enabled = false;
        let images = vec![network_image("u1", "ubuntu"), off];

        let files = builder().render(&images).unwrap();
        assert!(!files.contains_key("debian.ipxe"));
        assert!(!files["main.ipxe"].contains("debian"));
    }

    #[test]
    fn test_root_menu_item_order_sorted_jump_order_first_seen() {
        // Categories inserted out of sorted order: items sort, jumps do not
        let images = vec![network_image("z1", "zeta"), network_image("a1", "alpha")];
        let main = &builder().render(&images).unwrap()["main.ipxe"];

        let item_alpha = main.find("item alpha_menu").unwrap();
        let item_zeta = main.find("item zeta_menu").unwrap();
        assert!(item_alpha < item_zeta, "item list must sort by token");

        let jump_alpha = main.find(":alpha_menu").unwrap();
        let jump_zeta = main.find(":zeta_menu").unwrap();
        assert!(jump_zeta < jump_alpha, "jump sections keep first-seen order");
    }

    #[test]
    fn test_root_menu_system_block() {
        let main = &builder().render(&[network_image("u1", "ubuntu")]).unwrap()["main.ipxe"];

        assert!(main.contains("choose --timeout 30000 --default local selected && goto ${selected}"));
        assert!(main.contains("item local Boot from Local Disk"));
        assert!(main.contains("item shell iPXE Shell"));
        assert!(main.contains(":reboot\nreboot"));
        assert!(main.contains("chain ${base_url}/menus/ubuntu.ipxe || goto main_menu"));
    }

    #[test]
    fn test_category_menu_uses_display_name_and_back_link() {
        let files = builder().render(&[network_image("u1", "ubuntu")]).unwrap();
        let menu = &files["ubuntu.ipxe"];

        assert!(menu.contains(":ubuntu_menu\nmenu Ubuntu Distributions"));
        assert!(menu.contains("item back_main Back to Main Menu"));
        assert!(menu.ends_with(":back_main\nchain ${base_url}/menus/main.ipxe\n"));
    }

    #[test]
    fn test_enabled_tag_is_always_enabled_on_filtered_list() {
        let files = builder().render(&[network_image("u1", "ubuntu")]).unwrap();
        let menu = &files["ubuntu.ipxe"];
        assert!(menu.contains("item u1 Image u1 [Enabled]"));
        assert!(!menu.contains("[Disabled]"));
    }

    #[test]
    fn test_network_boot_section_rewrites_asset_paths() {
        let files = builder().render(&[network_image("u1", "ubuntu")]).unwrap();
        let menu = &files["ubuntu.ipxe"];

        assert!(menu.contains("set base_url http://192.168.1.20/netboot"));
        assert!(menu.contains("kernel ${base_url}/assets/u1/vmlinuz"));
        assert!(menu.contains("initrd ${base_url}/assets/u1/initrd"));
        assert!(menu.contains("boot || goto ubuntu_menu"));
    }

    #[test]
    fn test_initrd_line_omitted_when_absent() {
        let mut img = network_image("u1", "ubuntu");
        img.initrd = None;
        let files = builder().render(&[img]).unwrap();
        assert!(!files["ubuntu.ipxe"].contains("initrd "));
    }

    #[test]
    fn test_squashfs_without_boot_args_uses_default_args() {
        let mut img = network_image("u1", "ubuntu");
        img.squashfs = Some("assets/u1/filesystem.squashfs".to_string());
        let files = builder().render(&[img]).unwrap();

        assert!(files["ubuntu.ipxe"].contains(&format!(
            "imgargs vmlinuz {DEFAULT_BOOT_ARGS} url=http://192.168.1.20/netboot/assets/u1/filesystem.squashfs"
        )));
    }

    #[test]
    fn test_explicit_boot_args_without_squashfs_pass_verbatim() {
        let mut img = network_image("t1", "tools");
        img.boot_args = Some("console=ttyS0 quiet".to_string());
        let files = builder().render(&[img]).unwrap();

        let menu = &files["tools.ipxe"];
        assert!(menu.contains("imgargs vmlinuz console=ttyS0 quiet\n"));
        assert!(!menu.contains("url="));
    }

    #[test]
    fn test_local_image_renders_bare_exit_section() {
        let mut img = network_image("disk", "system");
        img.kind = ImageKind::Local;
        let files = builder().render(&[img]).unwrap();

        let menu = &files["system.ipxe"];
        assert!(menu.contains(":disk\nexit\n\n"));
        // None of the network directives leak in, even with kernel fields set
        assert!(!menu.contains("kernel "));
        assert!(!menu.contains("set base_url"));
    }

    #[test]
    fn test_kernel_less_network_image_listed_but_no_boot_section() {
        let mut img = network_image("broken", "tools");
        img.kernel = None;
        let files = builder().render(&[img]).unwrap();

        let menu = &files["tools.ipxe"];
        assert!(menu.contains("item broken"));
        assert!(!menu.contains(":broken\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let images = vec![network_image("z1", "zeta"), network_image("a1", "alpha")];
        let first = builder().render(&images).unwrap();
        let second = builder().render(&images).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_rejects_invalid_catalog() {
        let images = vec![network_image("u1", "ubuntu"), network_image("u1", "ubuntu")];
        assert_eq!(
            builder().render(&images),
            Err(Error::DuplicateImageId("u1".to_string()))
        );
    }

    #[test]
    fn test_entry_script_chains_root_menu() {
        let script = builder().with_http_root("boot").entry_script();
        assert!(script.starts_with("#!ipxe"));
        assert!(script.contains("set base_url http://192.168.1.20/boot"));
        assert!(script.contains("chain ${base_url}/menus/main.ipxe"));
    }
}
