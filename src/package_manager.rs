//! Package manager identifiers

crate::define_id_enum! {
    /// Package manager that governs a manifest file
    PackageManagerId {
        RubyGems => "rubygems" : "RubyGems",
        Npm => "npm" : "npm",
        Yarn => "yarn" : "Yarn",
        Pnpm => "pnpm" : "pnpm",
        Maven => "maven" : "Maven",
        Pip => "pip" : "pip",
        Sbt => "sbt" : "sbt",
        Gradle => "gradle" : "Gradle",
        GolangDep => "golangdep" : "dep",
        GoVendor => "govendor" : "govendor",
        GoModules => "gomodules" : "Go Modules",
        NuGet => "nuget" : "NuGet",
        Paket => "paket" : "Paket",
        Composer => "composer" : "Composer",
        CocoaPods => "cocoapods" : "CocoaPods",
        Poetry => "poetry" : "Poetry",
        Hex => "hex" : "Hex",
        /// Native C/C++ projects without a manifest. No registry key maps here.
        Unmanaged => "Unmanaged (C/C++)" : "Unmanaged (C/C++)",
        Swift => "swift" : "Swift Package Manager",
    }
}
