//! 路由注册表
//!
//! 各模块的 Delivery 只向注册表追加自己前缀下的路由；
//! 重复的 method+path 或被其他模块占用的前缀在组装阶段报错，而不是在 axum 内部 panic

use std::collections::HashSet;
use std::fmt;

use axum::{
    handler::Handler,
    http::Method,
    routing::{on, MethodFilter},
    Router,
};
use thiserror::Error;

/// 已注册的一条路由
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteEntry {
    pub module: &'static str,
    pub method: Method,
    pub path: String,
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.path, self.module)
    }
}

/// 路由冲突
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteConflict {
    #[error("Route {method} {path} registered twice (by {first} and {second})")]
    Duplicate {
        method: Method,
        path: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Prefix {prefix} claimed by {owner}, cannot be reused by {module}")]
    PrefixTaken {
        prefix: String,
        owner: &'static str,
        module: &'static str,
    },
}

/// 单个模块待挂载的路由
pub struct ModuleRoutes<S> {
    module: &'static str,
    prefix: String,
    router: Router<S>,
    entries: Vec<RouteEntry>,
    conflict: Option<RouteConflict>,
}

impl<S> ModuleRoutes<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(module: &'static str, prefix: impl Into<String>) -> Self {
        Self {
            module,
            prefix: prefix.into(),
            router: Router::new(),
            entries: Vec::new(),
            conflict: None,
        }
    }

    pub fn get<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::GET, path, handler)
    }

    pub fn post<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::POST, path, handler)
    }

    pub fn put<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::PUT, path, handler)
    }

    pub fn delete<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route(Method::DELETE, path, handler)
    }

    fn route<H, T>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let full_path = format!("{}{}", self.prefix, path);
        let entry = RouteEntry {
            module: self.module,
            method: method.clone(),
            path: full_path.clone(),
        };

        if self.conflict.is_none() && self.entries.contains(&entry) {
            self.conflict = Some(RouteConflict::Duplicate {
                method,
                path: full_path,
                first: self.module,
                second: self.module,
            });
            return self;
        }

        let Some(filter) = method_filter(&method) else {
            return self;
        };
        self.router = self.router.route(&full_path, on(filter, handler));
        self.entries.push(entry);
        self
    }
}

fn method_filter(method: &Method) -> Option<MethodFilter> {
    if method == Method::GET {
        Some(MethodFilter::GET)
    } else if method == Method::POST {
        Some(MethodFilter::POST)
    } else if method == Method::PUT {
        Some(MethodFilter::PUT)
    } else if method == Method::DELETE {
        Some(MethodFilter::DELETE)
    } else {
        None
    }
}

/// 全部模块共享的路由表
#[derive(Default)]
pub struct RouteRegistry {
    router: Router,
    entries: Vec<RouteEntry>,
    prefixes: Vec<(String, &'static str)>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 挂载一个模块的路由
    pub fn mount<S>(&mut self, routes: ModuleRoutes<S>, state: S) -> Result<(), RouteConflict>
    where
        S: Clone + Send + Sync + 'static,
    {
        if let Some(conflict) = routes.conflict {
            return Err(conflict);
        }

        if let Some((_, owner)) = self
            .prefixes
            .iter()
            .find(|(prefix, owner)| *prefix == routes.prefix && *owner != routes.module)
        {
            return Err(RouteConflict::PrefixTaken {
                prefix: routes.prefix,
                owner: *owner,
                module: routes.module,
            });
        }

        let existing: HashSet<(&Method, &str)> = self
            .entries
            .iter()
            .map(|e| (&e.method, e.path.as_str()))
            .collect();
        if let Some(dup) = routes
            .entries
            .iter()
            .find(|e| existing.contains(&(&e.method, e.path.as_str())))
        {
            let first = self
                .entries
                .iter()
                .find(|e| e.method == dup.method && e.path == dup.path)
                .map(|e| e.module)
                .unwrap_or(dup.module);
            return Err(RouteConflict::Duplicate {
                method: dup.method.clone(),
                path: dup.path.clone(),
                first,
                second: routes.module,
            });
        }

        tracing::debug!(
            module = routes.module,
            prefix = %routes.prefix,
            routes = routes.entries.len(),
            "Module routes mounted"
        );

        let module_router = routes.router.with_state(state);
        self.router = std::mem::take(&mut self.router).merge(module_router);
        self.entries.extend(routes.entries);
        self.prefixes.push((routes.prefix, routes.module));
        Ok(())
    }

    /// 已注册的全部路由
    pub fn routes(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn into_router(self) -> Router {
        self.router
    }
}
